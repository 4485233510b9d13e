//! mendlint CLI
//!
//! Reads an ESLint JSON report and applies the mechanical fixes it calls for.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_failures) => {
            if has_failures {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Fix {
            report,
            format,
            dry_run,
            check,
        } => commands::fix::run_fix(&cli, report, *format, *dry_run, *check),
        Commands::Triage {
            report,
            format,
            top,
        } => commands::triage::run_triage(&cli, report, *format, *top),
        Commands::Init { force } => {
            commands::init::run_init(*force)?;
            Ok(false)
        }
    }
}
