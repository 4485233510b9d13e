//! JSON output formatter

use mendlint_core::{FileRewriteResult, ReportSummary, StageEdits};
use miette::{IntoDiagnostic, Result};

pub fn output_fix_json(results: &[FileRewriteResult]) -> Result<()> {
    let mut totals = StageEdits::default();
    for result in results {
        totals += result.edits;
    }

    let output = serde_json::json!({
        "files": results,
        "totals": totals,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}

pub fn output_triage_json(summary: &ReportSummary, top: usize) -> Result<()> {
    let mut summary = summary.clone();
    summary.rules.truncate(top);
    summary.hotspots.truncate(top);

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).into_diagnostic()?
    );
    Ok(())
}
