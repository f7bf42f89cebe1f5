use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::reveal::{RevealScript, RevealStep};
use crate::seed::ADMIN_CODE;
use crate::{GateError, Result};

pub const DEFAULT_LOG_KEYWORD: &str = "logs";

/// Settings of a gate, persisted as TOML.
///
/// Every field has a default so a partial file is enough:
/// ```toml
/// admin_code = "secret"
/// roster_path = "roster.json"
///
/// [reveal]
/// hold_ms = 1000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub admin_code: String,
    pub roster_path: Option<PathBuf>,
    /// Reserved word toggling the system log, blank disables it
    pub log_keyword: String,
    pub reveal: RevealConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub lines: Vec<String>,
    pub delays_ms: Vec<u64>,
    pub hold_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            admin_code: ADMIN_CODE.to_owned(),
            roster_path: None,
            log_keyword: DEFAULT_LOG_KEYWORD.to_owned(),
            reveal: RevealConfig::default(),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        let script = RevealScript::default();
        Self {
            lines: script.steps.iter().map(|s| s.line.clone()).collect(),
            delays_ms: script
                .steps
                .iter()
                .map(|s| s.delay.as_millis() as u64)
                .collect(),
            hold_ms: script.hold.as_millis() as u64,
        }
    }
}

impl RevealConfig {
    pub fn script(&self) -> Result<RevealScript> {
        if self.lines.len() != self.delays_ms.len() {
            return Err(GateError::Config(format!(
                "reveal has {} lines but {} delays",
                self.lines.len(),
                self.delays_ms.len()
            )));
        }

        Ok(RevealScript {
            steps: self
                .lines
                .iter()
                .zip(&self.delays_ms)
                .map(|(line, millis)| RevealStep {
                    delay: Duration::from_millis(*millis),
                    line: line.clone(),
                })
                .collect(),
            hold: Duration::from_millis(self.hold_ms),
        })
    }
}

impl GateConfig {
    /// Load the configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: GateConfig = toml::from_str(&content)?;
        config.validate()?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn log_keyword(&self) -> Option<&str> {
        Some(self.log_keyword.trim()).filter(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.admin_code.trim().is_empty() {
            return Err(GateError::Config("admin code is blank".to_owned()));
        }
        // Input is trimmed before the comparison
        if self.admin_code.trim() != self.admin_code {
            return Err(GateError::Config(
                "admin code has leading or trailing whitespace".to_owned(),
            ));
        }
        self.reveal.script().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use tempdir::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new("giftgate_config").unwrap();
        let config = GateConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, GateConfig::default());
        assert_eq!(config.reveal.script().unwrap(), RevealScript::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new("giftgate_config").unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "admin_code = \"Secret\"\n\n[reveal]\nhold_ms = 10\n",
        )
        .unwrap();

        let config = GateConfig::load(&path).unwrap();
        assert_eq!(config.admin_code, "Secret");
        assert_eq!(config.log_keyword, "logs");
        assert_eq!(config.reveal.hold_ms, 10);
        assert_eq!(config.reveal.lines.len(), 4);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new("giftgate_config").unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = GateConfig::default();
        config.roster_path = Some(PathBuf::from("roster.json"));
        config.log_keyword = "registro".to_owned();
        config.save(&path).unwrap();

        assert_eq!(GateConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn blank_log_keyword_disables_it() {
        let dir = TempDir::new("giftgate_config").unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_keyword = \"\"\n").unwrap();

        let config = GateConfig::load(&path).unwrap();
        assert_eq!(config.log_keyword(), None);
        assert_eq!(GateConfig::default().log_keyword(), Some("logs"));
    }

    #[test]
    fn mismatched_reveal_is_rejected() {
        let dir = TempDir::new("giftgate_config").unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[reveal]\nlines = [\"one\"]\ndelays_ms = []\n")
            .unwrap();

        assert!(matches!(
            GateConfig::load(&path),
            Err(GateError::Config(_))
        ));
    }

    #[test]
    fn blank_admin_code_is_rejected() {
        let config = GateConfig {
            admin_code: "  ".to_owned(),
            ..GateConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn padded_admin_code_is_rejected() {
        let config = GateConfig {
            admin_code: " secret ".to_owned(),
            ..GateConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::Config(_))));
        assert!(Gate::from_config(&config, vec![]).is_err());

        let dir = TempDir::new("giftgate_config").unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "admin_code = \"secret \"\n").unwrap();
        assert!(matches!(
            GateConfig::load(&path),
            Err(GateError::Config(_))
        ));
    }
}
