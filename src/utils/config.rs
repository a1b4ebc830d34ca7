//! Configuration and constants for the engine and the CLI.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Reserved file key for entries whose script id never resolved
pub const UNKNOWN_FILE_KEY: &str = "";

/// Path prefixes the runtime uses for its own (non user-authored) scripts
pub const DEFAULT_INTERNAL_PREFIXES: &[&str] =
    &["node:", "internal/", "native ", "extensions::", "v8/"];

// Line tags recognized by the tokenizer
pub const TAG_SCRIPT_DETAILS: &str = "script-details";
pub const TAG_CODE_CREATION: &str = "code-creation";
pub const TAG_CODE_DEOPT: &str = "code-deopt";

/// Code types whose entries are runtime builtins rather than user functions
pub const BUILTIN_CODE_TYPES: &[&str] = &["Builtin", "Handler", "BytecodeHandler", "Stub", "RegExp"];

/// Below this many lines a multi-worker parse falls back to one worker
pub const MIN_LINES_PER_WORKER: usize = 1024;

/// Options controlling a single parse run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Keep entries located in the runtime's internal scripts
    pub keep_internals: bool,

    /// Prefixes that mark a file path as runtime-internal
    pub internal_prefixes: Vec<String>,

    /// Number of decode workers for pass 2 (1 = sequential)
    pub workers: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            keep_internals: false,
            internal_prefixes: DEFAULT_INTERNAL_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            workers: 1,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keep_internals(mut self, keep_internals: bool) -> Self {
        self.keep_internals = keep_internals;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// Load parse options from a TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// * `ConfigError::ReadFailed` - file cannot be read
/// * `ConfigError::InvalidToml` - contents are not valid options
pub fn load_options(path: impl AsRef<Path>) -> Result<ParseOptions, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let options: ParseOptions = toml::from_str(&contents)?;
    if options.workers == 0 {
        return Err(ConfigError::InvalidValue(
            "workers must be greater than 0".to_string(),
        ));
    }
    Ok(options)
}
