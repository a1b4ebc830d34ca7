//! Deopt Trace Studio
//!
//! Turns V8 `--trace-ic` logs into per-source-file reports of inline cache
//! transitions, deoptimizations and code tiering, ranked by severity.
//!
//! This crate provides the engine and the implementation of the
//! `deopt-trace` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! node --trace-ic --logfile=v8.log --no-logfile-per-isolate app.js
//! deopt-trace analyze --input v8.log --summary
//! ```
//!
//! As a library:
//!
//! ```ignore
//! use deopt_trace_studio::parser::parse_v8_log;
//! use deopt_trace_studio::utils::ParseOptions;
//!
//! let parsed = parse_v8_log(&log_text, &ParseOptions::default());
//! for (file, info) in &parsed.files {
//!     println!("{}: {} deopts", file, info.deopts.len());
//! }
//! ```

pub mod aggregator;
pub mod classify;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
