use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("unknown config key `{0}`")]
    UnknownKey(String),

    #[error("invalid value for `{key}`: {message}")]
    InvalidValue { key: String, message: String },

    #[error("configuration backup `{0}` not found")]
    BackupNotFound(String),
}
