//! Trace-log parsing and event definitions.
//!
//! This module handles:
//! - Splitting and classifying raw log lines
//! - Resolving script ids to file paths
//! - Decoding IC, deopt and code-creation records
//! - Driving the two-pass parse

pub mod decoder;
pub mod registry;
pub mod schema;
pub mod tokenizer;
pub mod v8_log;

// Re-export main types
pub use registry::ScriptRegistry;
pub use schema::{
    BailoutType, CodeEntry, CodeKind, CodeState, CodeUpdate, DeoptEntry, DeoptInfo, Diagnostic,
    IcEntry, IcState, IcType, LogEvent, ParseStats, PerFileDeoptInfo, Position, Severity,
};
pub use v8_log::{parse_v8_log, parse_v8_log_bytes, ParsedLog};
