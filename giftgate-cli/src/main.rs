use clap::Parser;

use crate::cli::Cli;
use crate::commands::{open::Open, Commands};
use crate::error::AppError;
use crate::util::{provide_config, provide_roster};

mod cli;
mod commands;
mod error;
mod render;
mod util;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let config = provide_config(&args.config)?;
    let roster = provide_roster(&config, &args.roster);

    let result: Result<(), AppError> =
        match args.command.unwrap_or(Commands::Open(Open {})) {
            Commands::Open(open) => open.run(&config, roster).await,
            Commands::Resolve(resolve) => resolve.run(&config, &roster),
            Commands::Audit(audit) => audit.run(&config, &roster),
            Commands::Export(export) => export.run(&roster),
            Commands::Countdown(countdown) => countdown.run(),
        };

    Ok(result?)
}
