//! CLI argument definitions for the codebook browser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "codebook",
    version,
    about = "Look up survey codebook metadata by item encoding",
    long_about = "Look up survey codebook metadata by item encoding.\n\n\
                  Resolves encodings such as v_0071 to their label, type, main\n\
                  question and response options."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub sources: SourceArgs,

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

/// Where to find the codebook and respondent data.
#[derive(Args)]
pub struct SourceArgs {
    /// TOML file naming the codebook, data file and delimiter.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Codebook JSON file (default: $CODEBOOK_DATA_DIR/codebook.json).
    #[arg(long = "codebook", value_name = "PATH", global = true)]
    pub codebook: Option<PathBuf>,

    /// Respondent data file (default: $CODEBOOK_DATA_DIR/data_project_metset.csv).
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Field delimiter of the data file (a single character, or "tab").
    #[arg(long = "delimiter", value_name = "CHAR", global = true)]
    pub delimiter: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List group ids with their main questions.
    Groups,

    /// List every item encoding.
    Encodings,

    /// Show label, type, group and options of one item.
    Item(EncodingArgs),

    /// Show the effective response options of one item.
    Options(OptionsArgs),

    /// Print the main question of the group owning an item.
    Question(EncodingArgs),

    /// Translate a raw data value into its option label.
    Decode(DecodeArgs),

    /// Overview of every item in the codebook.
    Summary,
}

#[derive(Args)]
pub struct EncodingArgs {
    /// Item encoding, e.g. v_0071.
    #[arg(value_name = "ENCODING")]
    pub encoding: String,
}

#[derive(Args)]
pub struct OptionsArgs {
    /// Item encoding, e.g. v_0071.
    #[arg(value_name = "ENCODING")]
    pub encoding: String,

    /// Print the options as a JSON object.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Item encoding, e.g. v_0071.
    #[arg(value_name = "ENCODING")]
    pub encoding: String,

    /// Raw value as stored in the data file.
    #[arg(value_name = "VALUE")]
    pub value: String,
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
