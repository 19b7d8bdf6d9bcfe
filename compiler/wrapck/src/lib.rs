//! wrapck: an inter-procedural checker for error wrapping.
//!
//! The library side of the `wrapck` binary:
//! - [`config`]: TOML configuration and the wrap policy
//! - [`input`]: the front-end dump and its lowering into the IR
//! - [`schedule`]: dependency levels over in-scope units
//! - [`driver`]: sequential and level-parallel runs
//! - [`render`]: human and JSON output, fact export
//! - [`commands`]: the `check` and `explain` subcommands

use std::path::PathBuf;

use thiserror::Error;
use wrapck_diagnostic::UnknownErrorCode;

pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
pub mod input;
pub mod render;
pub mod schedule;
pub mod tracing_setup;

pub use config::{Config, ConfigError};
pub use driver::{run, RunResult};
pub use input::LoadError;
pub use schedule::Schedule;

/// Failures that stop a run. Exit status 2.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    UnknownCode(#[from] UnknownErrorCode),
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
    #[error("failed to write facts to `{}`: {source}", .path.display())]
    Facts {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
