use std::path::PathBuf;

use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "giftgate-cli")]
#[clap(about = "Unlock, audit and edit a gift page roster", long_about = None)]
pub struct Cli {
    #[clap(long, global = true, help = "Path to the TOML config")]
    pub config: Option<PathBuf>,
    #[clap(
        long,
        global = true,
        help = "Roster JSON file, overrides the one from the config"
    )]
    pub roster: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Option<Commands>,
}
