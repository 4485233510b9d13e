//! Per-file rewrite driver.
//!
//! Threads the text through the sanitizer, the pattern rewrite table and the
//! dependency-array patcher, in that order, and writes the file only when the
//! final text differs from what was read.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::EngineError;
use crate::deps::{self, EXHAUSTIVE_DEPS};
use crate::diagnostic::{Diagnostic, FileDiagnostics};
use crate::error::SkipReason;
use crate::rewrite::RewriteTable;
use crate::sanitize;

/// Knobs for a rewrite run.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Run the invisible-character sanitizer.
    pub sanitize: bool,
    /// Run the dependency-array patcher.
    pub dependency_arrays: bool,
    /// Files matching this set are left alone.
    pub exclude: Option<GlobSet>,
    /// Compute results without writing anything.
    pub dry_run: bool,
}

impl RewriteOptions {
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.as_ref().is_some_and(|set| set.is_match(path))
    }
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            sanitize: true,
            dependency_arrays: true,
            exclude: None,
            dry_run: false,
        }
    }
}

/// Edits made by each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageEdits {
    /// Invisible code points removed.
    pub sanitized: usize,
    /// Distinct substitutions that changed the text.
    pub patterns: usize,
    /// Dependency names inserted.
    pub dependencies: usize,
}

impl StageEdits {
    pub fn total(&self) -> usize {
        self.sanitized + self.patterns + self.dependencies
    }
}

impl std::ops::AddAssign for StageEdits {
    fn add_assign(&mut self, other: Self) {
        self.sanitized += other.sanitized;
        self.patterns += other.patterns;
        self.dependencies += other.dependencies;
    }
}

/// A diagnostic that did not become an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDiagnostic {
    pub rule_id: String,
    pub line: usize,
    pub column: usize,
    pub reason: SkipReason,
}

impl SkippedDiagnostic {
    fn new(diagnostic: &Diagnostic, reason: SkipReason) -> Self {
        Self {
            rule_id: diagnostic.rule_id.clone(),
            line: diagnostic.line,
            column: diagnostic.column,
            reason,
        }
    }
}

/// What happened to the file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Written,
    Unchanged,
    /// Would have been written, but the run is a dry run.
    WouldWrite,
    Failed { reason: String },
}

/// Result of rewriting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRewriteResult {
    pub path: PathBuf,
    #[serde(skip)]
    pub original: String,
    #[serde(skip)]
    pub rewritten: String,
    #[serde(flatten)]
    pub status: FileStatus,
    pub edits: StageEdits,
    pub skipped: Vec<SkippedDiagnostic>,
}

impl FileRewriteResult {
    fn failed(path: &Path, error: &EngineError) -> Self {
        Self {
            path: path.to_path_buf(),
            original: String::new(),
            rewritten: String::new(),
            status: FileStatus::Failed {
                reason: error.to_string(),
            },
            edits: StageEdits::default(),
            skipped: Vec::new(),
        }
    }

    /// Whether the final text differs from the original.
    pub fn changed(&self) -> bool {
        self.original != self.rewritten
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }
}

/// Text-level result of the three stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRewrite {
    pub text: String,
    pub edits: StageEdits,
    pub skipped: Vec<SkippedDiagnostic>,
}

/// Runs the fixers for one file at a time.
///
/// Holds only shared references, so one rewriter can serve many threads.
#[derive(Debug, Clone)]
pub struct Rewriter<'a> {
    table: &'a RewriteTable,
    options: RewriteOptions,
}

impl<'a> Rewriter<'a> {
    pub fn new(table: &'a RewriteTable, options: RewriteOptions) -> Self {
        Self { table, options }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Applies every stage to `text` without touching the file system.
    pub fn rewrite_text(&self, text: &str, diagnostics: &[Diagnostic]) -> TextRewrite {
        let mut edits = StageEdits::default();

        let sanitized = if self.options.sanitize {
            let outcome = sanitize::sanitize(text);
            edits.sanitized = outcome.removed;
            outcome.text
        } else {
            text.to_string()
        };

        let patterns = self.table.apply(&sanitized, diagnostics);
        edits.patterns = patterns.applied;

        let mut skipped = Vec::new();
        let text = if self.options.dependency_arrays {
            let outcome = deps::patch_dependencies(&patterns.text, diagnostics);
            edits.dependencies = outcome.inserted;
            skipped.extend(
                outcome
                    .skipped()
                    .map(|(d, reason)| SkippedDiagnostic::new(d, reason.clone())),
            );
            outcome.text
        } else {
            patterns.text
        };

        skipped.extend(
            diagnostics
                .iter()
                .filter(|d| patterns.unmatched.contains(&d.rule_id.as_str()))
                .map(|d| SkippedDiagnostic::new(d, SkipReason::NoPatternMatch)),
        );
        skipped.extend(
            diagnostics
                .iter()
                .filter(|d| !self.has_remedy(&d.rule_id))
                .map(|d| SkippedDiagnostic::new(d, SkipReason::NoRemedy)),
        );
        skipped.sort_by_key(|s| (s.line, s.column));

        TextRewrite {
            text,
            edits,
            skipped,
        }
    }

    /// Reads the file, rewrites it and writes it back when it changed.
    ///
    /// Never returns an error: I/O failures end up in the result's status.
    pub fn rewrite_file(&self, file: &FileDiagnostics) -> FileRewriteResult {
        let path = file.path.as_path();

        if self.options.is_excluded(path) {
            debug!("Excluded: {}", path.display());
            return FileRewriteResult {
                path: path.to_path_buf(),
                original: String::new(),
                rewritten: String::new(),
                status: FileStatus::Unchanged,
                edits: StageEdits::default(),
                skipped: file
                    .diagnostics
                    .iter()
                    .map(|d| SkippedDiagnostic::new(d, SkipReason::NoRemedy))
                    .collect(),
            };
        }

        let original = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let error = EngineError::io(path, e);
                warn!("{}", error);
                return FileRewriteResult::failed(path, &error);
            }
        };

        let TextRewrite {
            text,
            edits,
            skipped,
        } = self.rewrite_text(&original, &file.diagnostics);

        let status = if text == original {
            FileStatus::Unchanged
        } else if self.options.dry_run {
            FileStatus::WouldWrite
        } else {
            match write_atomic(path, &text) {
                Ok(()) => {
                    info!("Rewrote {} ({} edits)", path.display(), edits.total());
                    FileStatus::Written
                }
                Err(error) => {
                    warn!("{}", error);
                    FileStatus::Failed {
                        reason: error.to_string(),
                    }
                }
            }
        };

        FileRewriteResult {
            path: path.to_path_buf(),
            original,
            rewritten: text,
            status,
            edits,
            skipped,
        }
    }

    /// Whether some stage can act on diagnostics of `rule_id`.
    pub fn has_remedy(&self, rule_id: &str) -> bool {
        self.table.is_fixable(rule_id)
            || (self.options.dependency_arrays && rule_id == EXHAUSTIVE_DEPS)
    }
}

/// Replaces `path` with `content` via a sibling temp file, so a failed write
/// leaves the original intact.
fn write_atomic(path: &Path, content: &str) -> Result<(), EngineError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(path)
        .map_err(|e| EngineError::io(path, e))?
        .permissions();

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| EngineError::io(path, e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| EngineError::io(path, e))?;
    temp.as_file()
        .set_permissions(permissions)
        .map_err(|e| EngineError::io(path, e))?;
    temp.persist(path)
        .map_err(|e| EngineError::io(path, e.error))?;

    Ok(())
}
