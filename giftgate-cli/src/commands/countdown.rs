use giftgate::countdown::parse_target;
use giftgate::CountdownReading;

use crate::error::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "countdown", about = "Time left until (or since) a date")]
pub struct Countdown {
    #[clap(help = "Target, e.g. 2026-01-01 or 2026-01-01T00:00:00")]
    date: String,
}

impl Countdown {
    pub fn run(&self) -> Result<(), AppError> {
        let target = parse_target(&self.date)?;
        println!("{}", CountdownReading::now(target));
        Ok(())
    }
}
