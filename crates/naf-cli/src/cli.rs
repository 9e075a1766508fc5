//! CLI argument definitions for `naf-rules`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "naf-rules",
    version,
    about = "Relabel NAF activity codes with tagged matching rules",
    long_about = "Apply the built-in relabeling rules of one classification tag to a\n\
                  business register extract (CSV or Parquet).\n\n\
                  Writes the relabeled dataset and an audit journal of every change."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply the rules of a tag to a dataset.
    Run(RunArgs),

    /// List the built-in rules.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Input dataset (.csv or .parquet).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Matching methods to enable (regex, fuzzy, similarity).
    #[arg(
        long = "methods",
        value_name = "METHOD",
        num_args = 1..,
        value_delimiter = ',',
        default_value = "regex"
    )]
    pub methods: Vec<String>,

    /// Rule tag selecting the classification revision.
    #[arg(long = "tag", default_value = "naf_2025")]
    pub tag: String,

    /// TOML file with column and strategy settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output directory (default: the input's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format (default: same as the input).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Apply rules and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Rows generated per synthetic-row rule, overriding each rule's count.
    #[arg(long = "synthetic-count", value_name = "N")]
    pub synthetic_count: Option<usize>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Only list rules carrying this tag.
    #[arg(long = "tag")]
    pub tag: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Parquet,
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
