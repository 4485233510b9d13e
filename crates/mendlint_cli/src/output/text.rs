//! Text output formatter

use mendlint_core::{FileRewriteResult, FileStatus, ReportSummary, RiskTier, StageEdits};

pub fn output_fix_text(results: &[FileRewriteResult], dry_run: bool) {
    let mut totals = StageEdits::default();
    let mut changed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for result in results {
        totals += result.edits;
        skipped += result.skipped.len();

        let label = match &result.status {
            FileStatus::Written => {
                changed += 1;
                "rewritten".to_string()
            }
            FileStatus::WouldWrite => {
                changed += 1;
                "would rewrite".to_string()
            }
            FileStatus::Failed { reason } => {
                failed += 1;
                format!("failed: {}", reason)
            }
            FileStatus::Unchanged if result.skipped.is_empty() => continue,
            FileStatus::Unchanged => "unchanged".to_string(),
        };

        println!("\n{}: {}", result.path.display(), label);
        if result.edits.total() > 0 {
            println!(
                "  sanitized {}, patterns {}, dependencies {}",
                result.edits.sanitized, result.edits.patterns, result.edits.dependencies
            );
        }
        for skip in &result.skipped {
            println!(
                "  {}:{} skipped [{}]: {}",
                skip.line, skip.column, skip.rule_id, skip.reason
            );
        }
    }

    let action = if dry_run { "Would rewrite" } else { "Rewrote" };
    println!();
    println!(
        "{} {} of {} files ({} edits: {} sanitized, {} patterns, {} dependencies), {} skipped, {} failed",
        action,
        changed,
        results.len(),
        totals.total(),
        totals.sanitized,
        totals.patterns,
        totals.dependencies,
        skipped,
        failed
    );
}

pub fn output_triage_text(summary: &ReportSummary, top: usize) {
    println!(
        "{} diagnostics in {} files ({} errors, {} warnings)",
        summary.diagnostics, summary.files, summary.errors, summary.warnings
    );
    println!("Automatically fixable: {}", summary.fixable);

    println!("\nBy risk tier:");
    for tier in RiskTier::ALL {
        println!("  {:<8} {}", tier.to_string(), summary.tiers.get(tier));
    }

    if !summary.rules.is_empty() {
        println!("\nTop rules:");
        println!("{:<50} | {:<6} | {:>6} | {:<7}", "Rule", "Tier", "Count", "Fixable");
        println!("{:-<50}-+-{:-<6}-+-{:->6}-+-{:-<7}", "", "", "", "");
        for rule in summary.rules.iter().take(top) {
            let fixable = if rule.fixable { "yes" } else { "no" };
            println!(
                "{:<50} | {:<6} | {:>6} | {:<7}",
                rule.rule_id,
                rule.tier.to_string(),
                rule.count,
                fixable
            );
        }
    }

    if !summary.hotspots.is_empty() {
        println!("\nMost affected files:");
        for file in summary.hotspots.iter().take(top) {
            println!("  {:>5}  {}", file.count, file.path.display());
        }
    }
}
