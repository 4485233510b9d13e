//! Triage command implementation

use std::path::Path;

use mendlint_core::{ReportSummary, Rewriter, load_report_file};
use miette::{IntoDiagnostic, Result};

use super::load_config;
use crate::cli::{Cli, OutputFormat};
use crate::output::output_triage;

pub fn run_triage(cli: &Cli, report: &Path, format: OutputFormat, top: usize) -> Result<bool> {
    let config = load_config(cli)?;
    let table = config.rewrite_table();
    let rewriter = Rewriter::new(&table, config.rewrite_options().into_diagnostic()?);

    let files = load_report_file(report).into_diagnostic()?;
    let summary = ReportSummary::from_report(&files, &config.risk_rules(), &rewriter);

    output_triage(&summary, format, top)?;
    Ok(false)
}
