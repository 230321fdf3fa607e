//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pdt_model::OutputFormat;

#[derive(Parser)]
#[command(
    name = "pdt",
    version,
    about = "Protocol Data Translator - Recode pathology exports to standardized terminology",
    long_about = "Translate tab-separated protocol export files into standardized\n\
                  terminology (SNOMED-style codes and descriptions), using the\n\
                  versioned codebooks published for each protocol."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate a protocol export file.
    Translate(TranslateArgs),

    /// List known protocols and their published codebook versions.
    Protocols(ProtocolsArgs),
}

#[derive(Parser)]
pub struct TranslateArgs {
    /// Tab-separated export file to translate.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Protocol the export was produced under.
    #[arg(long, default_value = pdt_codebook::protocols::DEFAULT_PROTOCOL)]
    pub protocol: String,

    /// Source language of the export.
    #[arg(long, default_value = "nl-NL")]
    pub language: String,

    /// Which parts of the terminology to write.
    #[arg(long = "format", value_enum, default_value = "descriptions")]
    pub format: OutputFormatArg,

    /// Output file (default: <INPUT> with `_out.txt` appended to the stem).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Codebooks directory (default: $PDT_CODEBOOKS_DIR, else ./codebooks).
    #[arg(long = "codebooks", value_name = "DIR")]
    pub codebooks: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ProtocolsArgs {
    /// Codebooks directory (default: $PDT_CODEBOOKS_DIR, else ./codebooks).
    #[arg(long = "codebooks", value_name = "DIR")]
    pub codebooks: Option<PathBuf>,

    /// Source language used when probing catalogs.
    #[arg(long, default_value = "nl-NL")]
    pub language: String,
}

/// CLI output format choices, mirroring [`OutputFormat`].
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Descriptions,
    Codes,
    CodesystemAndCodes,
    CodesAndDescriptions,
    CodesystemAndCodesAndDescriptions,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Descriptions => OutputFormat::Descriptions,
            OutputFormatArg::Codes => OutputFormat::Codes,
            OutputFormatArg::CodesystemAndCodes => OutputFormat::CodesystemAndCodes,
            OutputFormatArg::CodesAndDescriptions => OutputFormat::CodesAndDescriptions,
            OutputFormatArg::CodesystemAndCodesAndDescriptions => {
                OutputFormat::CodesystemAndCodesAndDescriptions
            }
        }
    }
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
