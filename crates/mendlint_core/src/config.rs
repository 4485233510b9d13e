//! Engine configuration.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::EngineError;
use crate::orchestrator::RewriteOptions;
use crate::rewrite::RewriteTable;
use crate::risk::RiskRules;

/// Configuration loaded from `.mendlint.jsonc` / `.mendlint.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MendConfig {
    /// Extra rule ids treated as high risk.
    #[serde(default)]
    pub high_risk_rules: Vec<String>,

    /// Extra rule ids treated as medium risk.
    #[serde(default)]
    pub medium_risk_rules: Vec<String>,

    /// Rule ids whose automatic remedy must not run.
    #[serde(default)]
    pub disabled_fixers: Vec<String>,

    /// Whether to strip invisible characters.
    #[serde(default = "default_sanitize")]
    pub sanitize: bool,

    /// Glob patterns of files never rewritten.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_sanitize() -> bool {
    true
}

impl MendConfig {
    /// Config file names, in discovery order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".mendlint.jsonc", ".mendlint.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            high_risk_rules: Vec::new(),
            medium_risk_rules: Vec::new(),
            disabled_fixers: Vec::new(),
            sanitize: true,
            exclude: Vec::new(),
        }
    }

    /// Finds the first config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| EngineError::config(format!("Failed to read config: {}", e)))?;
        Self::from_jsonc(&content)
    }

    /// Parses configuration from JSON with comments.
    pub fn from_jsonc(content: &str) -> Result<Self, EngineError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| EngineError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| EngineError::config(format!("Invalid config: {}", e)))
    }

    /// Risk sets extended with the configured rule ids.
    pub fn risk_rules(&self) -> RiskRules {
        RiskRules::with_extra(&self.high_risk_rules, &self.medium_risk_rules)
    }

    /// The built-in rewrite table minus disabled fixers.
    pub fn rewrite_table(&self) -> RewriteTable {
        RewriteTable::builtin().without(&self.disabled_fixers)
    }

    /// Orchestrator options derived from this config.
    pub fn rewrite_options(&self) -> Result<RewriteOptions, EngineError> {
        Ok(RewriteOptions {
            sanitize: self.sanitize,
            dependency_arrays: !self
                .disabled_fixers
                .iter()
                .any(|r| r == crate::deps::EXHAUSTIVE_DEPS),
            exclude: build_globset(&self.exclude)?,
            dry_run: false,
        })
    }
}

impl Default for MendConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, EngineError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| EngineError::config(format!("Invalid glob pattern: {}", e)))?;
        builder.add(glob);
    }

    let globset = builder
        .build()
        .map_err(|e| EngineError::config(format!("Failed to build globset: {}", e)))?;

    Ok(Some(globset))
}
