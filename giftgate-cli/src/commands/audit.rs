use giftgate::{audit, GateConfig, Profile};

use crate::error::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "audit", about = "Report unreachable keys and egg codes")]
pub struct Audit {}

impl Audit {
    pub fn run(
        &self,
        config: &GateConfig,
        roster: &[Profile],
    ) -> Result<(), AppError> {
        let findings = audit(roster, &config.admin_code);
        if findings.is_empty() {
            println!("{} profiles, nothing to report", roster.len());
        }
        for finding in findings {
            println!("- {}", finding);
        }
        Ok(())
    }
}
