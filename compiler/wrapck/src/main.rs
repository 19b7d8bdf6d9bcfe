//! wrapck command-line entry point.
//!
//! Exit status: 0 when clean, 1 when diagnostics were emitted, 2 on
//! configuration, input or output errors.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use wrapck::cli::{Cli, Command};
use wrapck::commands::{self, Outcome};
use wrapck::tracing_setup::init_tracing;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => {
            let stdout = std::io::stdout();
            let is_tty = stdout.is_terminal();
            match commands::check(&args, &mut stdout.lock(), is_tty) {
                Ok(Outcome::Clean) => ExitCode::SUCCESS,
                Ok(Outcome::Diagnostics) => ExitCode::from(1),
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::from(2)
                }
            }
        }
        Command::Explain { code } => match commands::explain(&code) {
            Ok(doc) => {
                println!("{doc}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                eprintln!();
                eprintln!("Codes have the format E#### (e.g. E1001, E1002, E1003).");
                ExitCode::from(2)
            }
        },
    }
}
