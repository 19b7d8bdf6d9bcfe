//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use wrapck_diagnostic::emitter::ColorMode;

use crate::render::OutputFormat;

/// Checks that errors are wrapped before they leave a function.
#[derive(Debug, Parser)]
#[command(name = "wrapck")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a front-end dump
    Check(CheckArgs),
    /// Show documentation for a diagnostic code
    Explain {
        /// Code such as E1002
        code: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Front-end dump (JSON)
    pub dump: PathBuf,

    /// Configuration file (defaults to ./wrapck.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Package path prefix of the units to analyze; overrides the config file
    #[arg(long)]
    pub scope: Option<String>,

    /// Signature of an additional wrapping function
    #[arg(long = "wrapper", value_name = "SIGNATURE")]
    pub wrappers: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// List the verdict of every function
    #[arg(long)]
    pub facts: bool,

    /// Write the fact table to a JSON file
    #[arg(long, value_name = "PATH")]
    pub emit_facts: Option<PathBuf>,

    /// Units checked concurrently; 0 uses every CPU
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorMode::Auto,
            ColorChoice::Always => ColorMode::Always,
            ColorChoice::Never => ColorMode::Never,
        }
    }
}
