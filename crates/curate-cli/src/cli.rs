//! CLI argument definitions for the curation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "curate",
    version,
    about = "Curate delimited clinical and microbiome table exports",
    long_about = "Deterministically turn human-exported delimited tables \
                  (patient records, taxonomy tables, abundance matrices) into \
                  canonical, analysis-ready form.\n\n\
                  Files are classified, their columns canonicalized, invalid \
                  rows and sentinel values scrubbed, and peri-transplant \
                  medication indicators reconciled. Curated files replace the \
                  originals; the originals are kept as _orig backups."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML file overriding the builtin schemas and drug registry.
    #[arg(long = "schemas", value_name = "PATH", global = true)]
    pub schemas: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Curate files in place, keeping the originals as backups.
    Run(FilesArgs),

    /// Dry run: classify and curate in memory, write nothing.
    Check(FilesArgs),

    /// List the configured file types and their schemas.
    Types,
}

#[derive(Parser)]
pub struct FilesArgs {
    /// Delimited table files to curate.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
