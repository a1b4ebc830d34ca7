use clap::ValueEnum;
use std::path::PathBuf;

/// File format written by the analyze command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Full JSON report
    #[default]
    Json,
    /// `window.V8Data = ...;` script for the web viewer
    Js,
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the V8 log to parse
    pub input: PathBuf,

    /// Output path for the report
    pub output: PathBuf,

    /// Output file format
    pub format: OutputFormat,

    /// Keep entries located in runtime-internal scripts
    pub keep_internals: bool,

    /// Decode workers (overrides the config file)
    pub workers: Option<usize>,

    /// Optional TOML file with parse options
    pub config: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of files listed in the summary
    pub summary_lines: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("v8.log"),
            output: PathBuf::from("deopt-report.json"),
            format: OutputFormat::Json,
            keep_internals: false,
            workers: None,
            config: None,
            print_summary: false,
            summary_lines: 20,
        }
    }
}
