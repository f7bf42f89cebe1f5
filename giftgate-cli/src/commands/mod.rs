use clap::Subcommand;

mod audit;
mod countdown;
mod export;
pub mod open;
mod resolve;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Open(open::Open),
    Resolve(resolve::Resolve),
    Audit(audit::Audit),
    Export(export::Export),
    Countdown(countdown::Countdown),
}
