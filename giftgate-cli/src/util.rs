use std::path::{Path, PathBuf};

use giftgate::storage::load_roster_or_seed;
use giftgate::{GateConfig, Profile};

use crate::error::AppError;

const CONFIG_DIR: &str = "giftgate";
const CONFIG_FILE: &str = "config.toml";

pub fn provide_config(
    config_path: &Option<PathBuf>,
) -> Result<GateConfig, AppError> {
    let path = match config_path {
        Some(path) => path.clone(),
        None => dirs::config_dir()
            .ok_or(AppError::ConfigDirNotFound)?
            .join(CONFIG_DIR)
            .join(CONFIG_FILE),
    };
    log::debug!("using config at {}", path.display());

    Ok(GateConfig::load(&path)?)
}

/// The `--roster` flag wins over the config's `roster_path`
pub fn provide_roster(
    config: &GateConfig,
    roster_path: &Option<PathBuf>,
) -> Vec<Profile> {
    let path: Option<&Path> =
        roster_path.as_deref().or(config.roster_path.as_deref());
    load_roster_or_seed(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftgate::storage::save_roster;
    use tempdir::TempDir;

    #[test]
    fn roster_flag_wins_over_config() {
        let dir = TempDir::new("giftgate_cli").unwrap();
        let from_config = dir.path().join("config_roster.json");
        let from_flag = dir.path().join("flag_roster.json");
        save_roster(&from_config, &[Profile::new("c", &["c"], "C")]).unwrap();
        save_roster(&from_flag, &[Profile::new("f", &["f"], "F")]).unwrap();

        let config = GateConfig {
            roster_path: Some(from_config),
            ..GateConfig::default()
        };
        assert_eq!(provide_roster(&config, &None)[0].id, "c");
        assert_eq!(provide_roster(&config, &Some(from_flag))[0].id, "f");
    }

    #[test]
    fn missing_config_file_means_defaults() {
        let dir = TempDir::new("giftgate_cli").unwrap();
        let path = Some(dir.path().join("absent.toml"));
        let config = provide_config(&path).unwrap();
        assert_eq!(config, GateConfig::default());
    }
}
