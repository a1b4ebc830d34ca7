//! Utility modules for configuration and error handling.

pub mod config;
pub mod error;

// Re-export commonly used types for convenience
pub use config::{load_options, ParseOptions, SCHEMA_VERSION, UNKNOWN_FILE_KEY};
pub use error::{ConfigError, DecodeError, OutputError};
