//! CLI argument definitions for `trackit`.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use trackit_ingest::parse_measurement_date;

#[derive(Parser)]
#[command(
    name = "trackit",
    version,
    about = "TRACK-IT export - convert QA measurement records into TRACK-IT import XML",
    long_about = "Convert a folder of QA measurement records into a TRACK-IT import file.\n\n\
                  The folder holds AnalysisValues.csv plus optional Parameters.csv,\n\
                  Measurements.csv and Metadata.csv. Each export writes <base>.xml\n\
                  and a <base>.log build log."
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
    /// Build the export XML and build log for a source folder.
    Export(ExportArgs),

    /// Check a source folder and build the export in memory, writing nothing.
    Check(SourceArgs),

    /// Print the MeasValues encoding of a single value.
    Encode(EncodeArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Folder containing AnalysisValues.csv and the optional record files.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Radiation unit (LINAC, HDR or kV unit) name; overrides Metadata.csv.
    #[arg(long = "machine", value_name = "NAME")]
    pub machine: Option<String>,

    /// Export author; overrides Metadata.csv.
    #[arg(long = "author")]
    pub author: Option<String>,

    /// Source template or software name; overrides the Metadata.csv title.
    #[arg(long = "source")]
    pub source: Option<String>,

    /// Measurement comment; overrides Metadata.csv.
    #[arg(long = "comment")]
    pub comment: Option<String>,

    /// Measurement date (YYYY-MM-DD, YYYY-MM-DD HH:MM:SS or YYYY-MM-DDTHH:MM:SS, UTC).
    #[arg(long = "date", value_name = "DATE", value_parser = parse_date_arg)]
    pub date: Option<NaiveDateTime>,

    /// Artifact base name (default: <author>_<source>_<timestamp>).
    #[arg(long = "base-name", value_name = "NAME")]
    pub base_name: Option<String>,

    /// Author label written into the document header.
    #[arg(long = "author-label", value_name = "LABEL")]
    pub author_label: Option<String>,

    /// Print the run summary as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory; artifacts go to <DIR>/xml and <DIR>/log (default: <FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Build and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct EncodeArgs {
    /// Value to encode.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Declared value type: String, Double, Long or Boolean.
    #[arg(long = "type", value_name = "TYPE")]
    pub value_type: String,
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

fn parse_date_arg(value: &str) -> Result<NaiveDateTime, String> {
    parse_measurement_date(value, Path::new("--date")).map_err(|err| err.to_string())
}
