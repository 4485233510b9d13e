//! Parallel rewriting of a whole report.

use std::collections::HashMap;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::diagnostic::FileDiagnostics;
use crate::orchestrator::{FileRewriteResult, Rewriter};

/// Rewrites every file in the report, one worker per file.
///
/// Returns one result per distinct path, in report order. Groups that repeat
/// a path are merged into the first group for that path, so a report with
/// duplicates yields fewer results than it has groups. A failure on one file
/// never stops the others.
pub fn rewrite_report(files: &[FileDiagnostics], rewriter: &Rewriter<'_>) -> Vec<FileRewriteResult> {
    let files = merge_duplicate_paths(files);
    debug!("Rewriting {} files", files.len());

    let results: Vec<FileRewriteResult> = files
        .par_iter()
        .map(|file| rewriter.rewrite_file(file))
        .collect();

    let failed = results.iter().filter(|r| r.is_failed()).count();
    if failed > 0 {
        warn!("{} of {} files could not be rewritten", failed, results.len());
    }

    results
}

/// Groups that share a path would race on the same file; fold them into one.
fn merge_duplicate_paths(files: &[FileDiagnostics]) -> Vec<FileDiagnostics> {
    let mut merged: Vec<FileDiagnostics> = Vec::with_capacity(files.len());
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    for file in files {
        match index.get(&file.path).copied() {
            Some(i) => {
                merged[i]
                    .diagnostics
                    .extend(file.diagnostics.iter().cloned());
            }
            None => {
                index.insert(file.path.clone(), merged.len());
                merged.push(file.clone());
            }
        }
    }

    merged
}
