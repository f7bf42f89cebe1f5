use thiserror::Error;

pub type Result<T> = std::result::Result<T, GateError>;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),
    #[error("Profile {0} has no easter egg at index {1}")]
    UnknownEgg(String, usize),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for GateError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<toml::de::Error> for GateError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<toml::ser::Error> for GateError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Other(anyhow::anyhow!(value.to_string()))
    }
}

impl From<chrono::ParseError> for GateError {
    fn from(value: chrono::ParseError) -> Self {
        Self::Parse(value.to_string())
    }
}
