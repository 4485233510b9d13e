//! Fix command implementation

use std::path::Path;

use mendlint_core::{FileStatus, Rewriter, load_report_file, rewrite_report};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use super::load_config;
use crate::cli::{Cli, OutputFormat};
use crate::output::output_fix;

/// Returns `true` when some file failed, or when `check` found pending rewrites.
pub fn run_fix(
    cli: &Cli,
    report: &Path,
    format: OutputFormat,
    dry_run: bool,
    check: bool,
) -> Result<bool> {
    let config = load_config(cli)?;
    let table = config.rewrite_table();
    let mut options = config.rewrite_options().into_diagnostic()?;
    options.dry_run = dry_run || check;

    let files = load_report_file(report).into_diagnostic()?;
    info!("Loaded {} file groups from {}", files.len(), report.display());

    let rewriter = Rewriter::new(&table, options);
    let results = rewrite_report(&files, &rewriter);

    output_fix(&results, format, rewriter.options().dry_run)?;

    let failed = results.iter().any(|r| r.is_failed());
    let pending = check && results.iter().any(|r| r.status == FileStatus::WouldWrite);

    Ok(failed || pending)
}
