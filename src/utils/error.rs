//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! The parsing engine itself never fails: `DecodeError` only travels from the
//! decoder to the driver, which logs and skips the offending line.

use thiserror::Error;

/// Why a single tagged log line could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{tag}: missing field '{field}'")]
    MissingField {
        tag: &'static str,
        field: &'static str,
    },

    #[error("{tag}: field '{field}' is not a number: {value:?}")]
    InvalidNumber {
        tag: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{tag}: not a source location: {value:?}")]
    InvalidLocation { tag: &'static str, value: String },

    #[error("unknown IC state: {0:?}")]
    UnknownIcState(String),

    #[error("unknown code state: {0:?}")]
    UnknownCodeState(String),

    #[error("unknown bailout type: {0:?}")]
    UnknownBailoutType(String),
}

/// Errors that can occur while loading parse options
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
