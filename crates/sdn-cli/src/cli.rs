//! CLI argument definitions for the SDN list mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ofac-mapper",
    version,
    about = "Convert the OFAC SDN list to entity-resolution JSON",
    long_about = "Convert the OFAC SDN XML list to newline-delimited JSON.\n\n\
                  Identifier types and issuing countries are classified through a\n\
                  human-reviewed code table, which is updated with usage counts and\n\
                  examples after every run."
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
    /// Convert an SDN XML file to NDJSON and update the code table.
    Convert(ConvertArgs),

    /// List the code table for review.
    Codes(CodesArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// SDN list XML file.
    #[arg(short = 'i', long = "input", value_name = "XML")]
    pub input: PathBuf,

    /// Output file (default: <INPUT> with a .json extension).
    #[arg(short = 'o', long = "output", value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Write mapping statistics to this JSON file.
    #[arg(short = 'l', long = "stats-file", value_name = "JSON")]
    pub stats_file: Option<PathBuf>,

    /// Code classification table (default: $OFAC_CODES_FILE, then ofac_codes.csv).
    #[arg(long = "codes-file", value_name = "CSV")]
    pub codes_file: Option<PathBuf>,

    /// Extra state and province codes (NAME,CODE columns).
    #[arg(long = "state-codes-file", value_name = "CSV")]
    pub state_codes_file: Option<PathBuf>,

    /// TOML run configuration.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Emit only PERSON and ORGANIZATION records.
    #[arg(long = "core-only")]
    pub core_only: bool,

    /// Pre-fill the attribute of newly discovered identifier types.
    ///
    /// Suggested rows are still written unreviewed.
    #[arg(long = "suggest-new-codes")]
    pub suggest_new_codes: bool,

    /// Do not write the updated code table back.
    #[arg(long = "no-save-codes")]
    pub no_save_codes: bool,
}

#[derive(Parser)]
pub struct CodesArgs {
    /// Code classification table (default: $OFAC_CODES_FILE, then ofac_codes.csv).
    #[arg(long = "codes-file", value_name = "CSV")]
    pub codes_file: Option<PathBuf>,

    /// Only list rows that still need review.
    #[arg(long = "unreviewed")]
    pub unreviewed: bool,
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
