//! Deopt Trace Studio CLI
//!
//! Parses V8 trace logs and writes per-file deoptimization reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use deopt_trace_studio::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs, OutputFormat,
};

/// Deopt Trace Studio - deoptimization reports for V8 trace logs
#[derive(Parser, Debug)]
#[command(name = "deopt-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a V8 log and write a per-file report
    Analyze {
        /// Path to the V8 log (produced with --trace-ic)
        #[arg(short, long, default_value = "v8.log")]
        input: PathBuf,

        /// Output path for the report
        #[arg(short, long, default_value = "deopt-report.json")]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Keep entries located in runtime-internal scripts
        #[arg(long, env = "DEOPT_TRACE_KEEP_INTERNALS")]
        keep_internals: bool,

        /// Number of decode workers
        #[arg(long)]
        workers: Option<usize>,

        /// TOML file with parse options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of files listed in the summary
        #[arg(long, default_value = "20")]
        summary_lines: usize,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            output,
            format,
            keep_internals,
            workers,
            config,
            summary,
            summary_lines,
        } => {
            let args = AnalyzeArgs {
                input,
                output,
                format,
                keep_internals,
                workers,
                config,
                print_summary: summary,
                summary_lines,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
