//! CLI argument definitions for the duomodel binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Output format flag
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    /// Aligned, indented text
    Human,
    /// One JSON document per invocation
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => OutputFormat::Human,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Inspect JSON documents as Model trees
#[derive(Parser, Debug)]
#[command(name = "duomodel")]
#[command(about = "duomodel: load JSON documents as ordered Hash/List models and inspect them")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", env = "DUOMODEL_FORMAT")]
    pub format: Format,

    /// Keep object members in document order instead of sorting them by key
    #[arg(long, global = true, env = "DUOMODEL_NO_SORT")]
    pub no_sort: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every entry, recursing into nested models
    Dump(FileArgs),
    /// Print the top-level keys in order
    Keys(FileArgs),
    /// Look up a value by walking nested models key by key
    Get(GetArgs),
    /// Print the re-encoded document
    Encode(EncodeArgs),
}

/// Arguments for commands that only read a document
#[derive(clap::Args, Debug)]
pub struct FileArgs {
    /// JSON document to load
    pub file: PathBuf,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// JSON document to load
    pub file: PathBuf,

    /// Keys to follow; list positions are given as integers
    #[arg(required = true, allow_negative_numbers = true)]
    pub keys: Vec<String>,
}

/// Arguments for the encode command
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    /// JSON document to load
    pub file: PathBuf,

    /// Indent the output
    #[arg(long)]
    pub pretty: bool,
}
