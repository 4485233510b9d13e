//! # mendlint_core
//!
//! Rewrite engine that turns an ESLint JSON report into source edits.
//!
//! This crate provides:
//! - Report loading into [`Diagnostic`] values
//! - Risk tier classification
//! - The pattern rewrite table, dependency-array patcher and sanitizer
//! - The per-file [`Rewriter`] and a parallel driver for whole reports
//!
//! ## Example
//!
//! ```rust,ignore
//! use mendlint_core::{MendConfig, Rewriter, load_report_file, rewrite_report};
//!
//! let config = MendConfig::default();
//! let table = config.rewrite_table();
//! let rewriter = Rewriter::new(&table, config.rewrite_options()?);
//!
//! let report = load_report_file("eslint-report.json".as_ref())?;
//! for result in rewrite_report(&report, &rewriter) {
//!     println!("{}: {} edits", result.path.display(), result.edits.total());
//! }
//! ```

mod config;
pub mod deps;
mod diagnostic;
mod error;
mod orchestrator;
mod parallel;
pub mod rewrite;
mod risk;
pub mod sanitize;
mod summary;

pub use config::MendConfig;
pub use deps::{DependencyOutcome, EXHAUSTIVE_DEPS, PatchStatus, patch_dependencies};
pub use diagnostic::{
    Diagnostic, FileDiagnostics, Severity, Suggestion, UNKNOWN_RULE, load_report,
    load_report_file, load_report_value,
};
pub use error::{EngineError, SkipReason};
pub use orchestrator::{
    FileRewriteResult, FileStatus, RewriteOptions, Rewriter, SkippedDiagnostic, StageEdits,
    TextRewrite,
};
pub use parallel::rewrite_report;
pub use rewrite::{PatternOutcome, RewriteRule, RewriteTable};
pub use risk::{HIGH_RISK_RULES, MEDIUM_RISK_RULES, RiskRules, RiskTier};
pub use sanitize::{SanitizeOutcome, sanitize};
pub use summary::{FileCount, ReportSummary, RuleCount, TierCounts};
