use giftgate::GateError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't locate the config directory")]
    ConfigDirNotFound,

    #[error("Unknown admin command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    IoError(#[from] io::Error),
}
