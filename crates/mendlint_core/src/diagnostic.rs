//! Diagnostic model and ESLint report loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::EngineError;

/// Rule id used when a message carries no `ruleId` (fatal parse errors, for example).
pub const UNKNOWN_RULE: &str = "unknown";

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    Error,
    /// Warning - should be reviewed.
    Warning,
}

impl Severity {
    /// Normalizes an ESLint numeric severity.
    ///
    /// `2` is an error; every other code, including a missing one, is a warning.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(2) => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// An opaque suggestion attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suggestion(pub serde_json::Value);

impl Suggestion {
    /// Human readable description of the suggestion, if it has one.
    pub fn description(&self) -> Option<&str> {
        self.0
            .get("description")
            .or_else(|| self.0.get("desc"))
            .and_then(|v| v.as_str())
    }
}

/// One linter finding at a file position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File the finding belongs to.
    pub file_path: PathBuf,

    /// The rule that produced the finding, or [`UNKNOWN_RULE`].
    pub rule_id: String,

    /// Severity level.
    pub severity: Severity,

    /// 1-based line, 0 when the report did not say.
    pub line: usize,

    /// 1-based column, 0 when the report did not say.
    pub column: usize,

    /// The diagnostic message.
    pub message: String,

    /// Suggestions in report order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(
        file_path: impl Into<PathBuf>,
        rule_id: impl Into<String>,
        severity: Severity,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            rule_id: rule_id.into(),
            severity,
            line,
            column,
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    /// Attaches suggestions.
    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

/// All diagnostics reported for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDiagnostics {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFileReport {
    file_path: Option<String>,
    #[serde(default)]
    messages: Vec<RawMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    rule_id: Option<String>,
    severity: Option<i64>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    line: usize,
    #[serde(default)]
    column: usize,
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

/// Parses an ESLint JSON report.
///
/// The whole load fails if any group lacks a file path; a missing rule id is
/// mapped to [`UNKNOWN_RULE`].
pub fn load_report(json: &str) -> Result<Vec<FileDiagnostics>, EngineError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| EngineError::malformed(format!("Invalid JSON: {}", e)))?;
    load_report_value(value)
}

/// Same as [`load_report`] for an already deserialized report.
pub fn load_report_value(value: serde_json::Value) -> Result<Vec<FileDiagnostics>, EngineError> {
    let serde_json::Value::Array(groups) = value else {
        return Err(EngineError::malformed("report root must be an array"));
    };

    let mut files = Vec::with_capacity(groups.len());
    for (index, group) in groups.into_iter().enumerate() {
        let raw: RawFileReport = serde_json::from_value(group)
            .map_err(|e| EngineError::malformed(format!("group {}: {}", index, e)))?;
        let path = raw
            .file_path
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| EngineError::malformed(format!("group {} has no filePath", index)))?;

        let diagnostics = raw
            .messages
            .into_iter()
            .map(|m| Diagnostic {
                file_path: path.clone(),
                rule_id: m.rule_id.unwrap_or_else(|| UNKNOWN_RULE.to_string()),
                severity: Severity::from_code(m.severity),
                line: m.line,
                column: m.column,
                message: m.message,
                suggestions: m.suggestions,
            })
            .collect::<Vec<_>>();

        debug!(
            "Loaded {} diagnostics for {}",
            diagnostics.len(),
            path.display()
        );
        files.push(FileDiagnostics { path, diagnostics });
    }

    Ok(files)
}

/// Reads and parses a report file.
pub fn load_report_file(path: &Path) -> Result<Vec<FileDiagnostics>, EngineError> {
    let content = fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
    load_report(&content)
}
