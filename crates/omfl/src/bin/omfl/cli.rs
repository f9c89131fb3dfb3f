//! omfl cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    ///
    /// This is equivalent to running { cd <directory>; omfl ... }
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a document to JSON, YAML or XML
    ///
    /// Invalid documents are rejected with a list of their issues.
    Convert(ConvertCommand),

    /// Validate a document and list every issue
    Check(CheckCommand),

    /// Print the value at a dotted path
    Get(GetCommand),
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Document to read, stdin when omitted
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ConvertCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: ConvertFormat,

    /// Write to this file instead of stdout
    #[clap(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckCommand {
    #[clap(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Debug)]
pub struct GetCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Dotted path, e.g. `server.tls.port`
    #[clap(short = 'p', long = "path")]
    pub path: String,

    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: ValueFormat,
}

#[derive(ValueEnum, Clone, Copy, Default, Debug)]
pub enum ConvertFormat {
    #[default]
    Json,
    Yaml,
    Xml,
}

impl std::fmt::Display for ConvertFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertFormat::Json => f.write_str("json"),
            ConvertFormat::Yaml => f.write_str("yaml"),
            ConvertFormat::Xml => f.write_str("xml"),
        }
    }
}

impl From<ConvertFormat> for omfl::Format {
    fn from(value: ConvertFormat) -> Self {
        match value {
            ConvertFormat::Json => omfl::Format::Json,
            ConvertFormat::Yaml => omfl::Format::Yaml,
            ConvertFormat::Xml => omfl::Format::Xml,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Default, Debug)]
pub enum ValueFormat {
    #[default]
    Json,
    Yaml,
}

impl std::fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueFormat::Json => f.write_str("json"),
            ValueFormat::Yaml => f.write_str("yaml"),
        }
    }
}
