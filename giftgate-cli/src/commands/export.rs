use std::path::PathBuf;

use giftgate::storage::{export_roster, save_roster};
use giftgate::Profile;

use crate::error::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "export", about = "Write the roster as versioned JSON")]
pub struct Export {
    #[clap(value_parser, help = "Destination file, stdout if omitted")]
    path: Option<PathBuf>,
}

impl Export {
    pub fn run(&self, roster: &[Profile]) -> Result<(), AppError> {
        match &self.path {
            Some(path) => {
                save_roster(path, roster)?;
                println!("roster written to {}", path.display());
            }
            None => println!("{}", export_roster(roster)?),
        }
        Ok(())
    }
}
