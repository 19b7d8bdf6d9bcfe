//! The `check` command.

use std::io::Write;
use std::num::NonZeroUsize;

use tracing::info;

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::render::{self, RenderOptions};
use crate::schedule::Schedule;
use crate::{driver, input, DriverError};

/// Result of a successful check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No diagnostics.
    Clean,
    /// At least one diagnostic was emitted.
    Diagnostics,
}

/// Load configuration and the dump, check every in-scope unit, and write
/// the report to `out`.
///
/// Configuration is resolved before the dump is read, so a missing scope
/// fails before any unit is analyzed.
pub fn check<W: Write>(args: &CheckArgs, out: &mut W, is_tty: bool) -> Result<Outcome, DriverError> {
    let policy = Config::load(args.config.as_deref())?.into_policy(args.scope.clone(), &args.wrappers)?;
    info!(scope = policy.scope(), wrappers = policy.wrappers().len(), "policy loaded");

    let program = input::load(&args.dump)?;
    let schedule = Schedule::build(&program, &policy);
    info!(
        units = schedule.len(),
        levels = schedule.levels.len(),
        skipped = schedule.skipped.len(),
        "schedule built"
    );

    let jobs = match args.jobs {
        0 => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        jobs => jobs,
    };
    let result = driver::run(&program, &policy, &schedule, jobs);

    let options = RenderOptions {
        format: args.format,
        color: args.color.into(),
        is_tty,
        show_facts: args.facts,
    };
    render::render(out, &program, &result, &options).map_err(DriverError::Output)?;
    if let Some(path) = &args.emit_facts {
        render::write_facts(path, &program, &result.facts).map_err(|source| {
            DriverError::Facts {
                path: path.clone(),
                source,
            }
        })?;
    }

    Ok(if result.is_clean() {
        Outcome::Clean
    } else {
        Outcome::Diagnostics
    })
}

#[cfg(test)]
mod tests;
