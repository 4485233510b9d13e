//! Risk tier classification.
//!
//! Tiers decide which diagnostics get reviewed first, so the precedence in
//! [`RiskRules::classify`] is part of the public contract:
//!
//! 1. rule id in the high-risk set → [`RiskTier::High`]
//! 2. rule id in the medium-risk set → [`RiskTier::Medium`]
//! 3. otherwise severity decides: error → High, warning → Medium
//! 4. anything left → [`RiskTier::Low`]

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;

/// Built-in rules whose findings are treated as likely bugs or type holes.
pub const HIGH_RISK_RULES: &[&str] = &[
    "@typescript-eslint/no-explicit-any",
    "@typescript-eslint/no-unused-vars",
    "no-unused-vars",
    "@typescript-eslint/no-unsafe-assignment",
    "@typescript-eslint/no-unsafe-member-access",
    "@typescript-eslint/no-unsafe-call",
];

/// Built-in rules about typing quality and conventions.
pub const MEDIUM_RISK_RULES: &[&str] = &[
    "@typescript-eslint/no-non-null-assertion",
    "@typescript-eslint/prefer-nullish-coalescing",
    "@typescript-eslint/prefer-optional-chain",
    "@typescript-eslint/no-empty-interface",
    "prefer-const",
    "react-hooks/exhaustive-deps",
    "react-refresh/only-export-components",
    "@typescript-eslint/no-empty-function",
    "no-console",
];

/// Coarse priority bucket. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// All tiers, highest first.
    pub const ALL: [RiskTier; 3] = [RiskTier::High, RiskTier::Medium, RiskTier::Low];
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::High => write!(f, "high"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::Low => write!(f, "low"),
        }
    }
}

/// The two membership sets used by the classifier.
///
/// Built once at startup and shared by reference; nothing mutates it after
/// construction.
#[derive(Debug, Clone)]
pub struct RiskRules {
    high: HashSet<String>,
    medium: HashSet<String>,
}

impl RiskRules {
    /// The built-in sets.
    pub fn builtin() -> Self {
        Self::with_extra(&[], &[])
    }

    /// The built-in sets extended with additional rule ids.
    pub fn with_extra(high: &[String], medium: &[String]) -> Self {
        let high = HIGH_RISK_RULES
            .iter()
            .map(|r| r.to_string())
            .chain(high.iter().cloned())
            .collect();
        let medium = MEDIUM_RISK_RULES
            .iter()
            .map(|r| r.to_string())
            .chain(medium.iter().cloned())
            .collect();
        Self { high, medium }
    }

    /// Maps a rule id and severity to a tier. Pure and total.
    pub fn classify(&self, rule_id: &str, severity: Severity) -> RiskTier {
        if self.high.contains(rule_id) {
            return RiskTier::High;
        }
        if self.medium.contains(rule_id) {
            return RiskTier::Medium;
        }
        match severity {
            Severity::Error => RiskTier::High,
            Severity::Warning => RiskTier::Medium,
        }
    }
}

impl Default for RiskRules {
    fn default() -> Self {
        Self::builtin()
    }
}
