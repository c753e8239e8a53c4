use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported language `{0}`")]
    Language(String),
    #[error("unsupported theme `{0}`")]
    Theme(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage unavailable")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config fetch failed: {0}")]
    Fetch(String),
    #[error("config decode failed: {0}")]
    Decode(String),
    #[error("{name} must be a boolean, got `{value}`")]
    InvalidBool { name: &'static str, value: String },
    #[error("{name} must be a positive integer, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },
}
