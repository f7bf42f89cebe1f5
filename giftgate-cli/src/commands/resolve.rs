use giftgate::{resolve, GateConfig, Profile, Resolution};

use crate::error::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "resolve", about = "Classify a code without opening the gate")]
pub struct Resolve {
    #[clap(help = "Code as a visitor would type it")]
    code: String,
}

impl Resolve {
    pub fn run(
        &self,
        config: &GateConfig,
        roster: &[Profile],
    ) -> Result<(), AppError> {
        config.validate()?;

        match resolve(&self.code, roster, &config.admin_code) {
            Resolution::Admin => println!("admin"),
            Resolution::EasterEgg { profile, egg } => println!(
                "easter egg of profile {}: {}",
                profile.id, egg.response
            ),
            Resolution::Unlock { profile } => println!(
                "unlocks profile {} ({})",
                profile.id, profile.display_name
            ),
            Resolution::Denied if self.is_log_keyword(config) => {
                println!("toggles the system log")
            }
            Resolution::Denied => println!("denied"),
        }
        Ok(())
    }

    fn is_log_keyword(&self, config: &GateConfig) -> bool {
        config.log_keyword().is_some_and(|k| {
            k.to_lowercase() == self.code.trim().to_lowercase()
        })
    }
}
