//! Output formatting module

mod json;
mod text;

use mendlint_core::{FileRewriteResult, ReportSummary};
use miette::Result;

use crate::cli::OutputFormat;

pub fn output_fix(results: &[FileRewriteResult], format: OutputFormat, dry_run: bool) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_fix_json(results)?,
        OutputFormat::Text => text::output_fix_text(results, dry_run),
    }
    Ok(())
}

pub fn output_triage(summary: &ReportSummary, format: OutputFormat, top: usize) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_triage_json(summary, top)?,
        OutputFormat::Text => text::output_triage_text(summary, top),
    }
    Ok(())
}
