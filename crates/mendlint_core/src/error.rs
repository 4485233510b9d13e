//! Engine error types.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while loading a report or rewriting a file.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The diagnostic report is missing required fields or is not a report at all.
    #[error("Malformed report: {0}")]
    MalformedReport(String),

    /// A file could not be read or written.
    #[error("I/O failure on {}: {source}", path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Creates a malformed report error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedReport(message.into())
    }

    /// Creates an I/O failure bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Why a single diagnostic was not turned into an edit.
///
/// These never abort a run; they are collected on the file's result so that
/// every diagnostic shows up either as an edit or as a skip.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The message did not name a missing dependency in a recognised form.
    #[error("could not extract a dependency name from the message")]
    UnresolvedDependencyName,

    /// The reported line does not exist in the current text.
    #[error("line {line} is out of range (file has {line_count} lines)")]
    OutOfRangeLine { line: usize, line_count: usize },

    /// The target line has no bracketed list to edit.
    #[error("no dependency list found on the target line")]
    NoMatchingShape,

    /// The rule has substitutions, but none of them matched the file.
    #[error("no rewrite pattern matched this construct")]
    NoPatternMatch,

    /// No fixer is registered (or enabled) for the rule id.
    #[error("no automatic remedy for this rule")]
    NoRemedy,
}
