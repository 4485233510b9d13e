//! Report-level aggregates used for triage.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostic::{FileDiagnostics, Severity};
use crate::orchestrator::Rewriter;
use crate::risk::{RiskRules, RiskTier};

/// Diagnostic counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn get(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::High => self.high,
            RiskTier::Medium => self.medium,
            RiskTier::Low => self.low,
        }
    }

    fn bump(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::High => self.high += 1,
            RiskTier::Medium => self.medium += 1,
            RiskTier::Low => self.low += 1,
        }
    }
}

/// Occurrences of one rule across the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCount {
    pub rule_id: String,
    /// Highest tier any occurrence was classified as.
    pub tier: RiskTier,
    pub count: usize,
    pub fixable: bool,
}

/// Diagnostics reported for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCount {
    pub path: PathBuf,
    pub count: usize,
}

/// Triage view of a loaded report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub files: usize,
    pub diagnostics: usize,
    pub errors: usize,
    pub warnings: usize,
    pub tiers: TierCounts,
    /// Diagnostics some stage can act on.
    pub fixable: usize,
    /// Sorted by tier, then count, both descending.
    pub rules: Vec<RuleCount>,
    /// Files with at least one diagnostic, most affected first.
    pub hotspots: Vec<FileCount>,
}

impl ReportSummary {
    /// Classifies every diagnostic and aggregates the counts.
    pub fn from_report(files: &[FileDiagnostics], risk: &RiskRules, rewriter: &Rewriter<'_>) -> Self {
        let mut summary = Self {
            files: files.len(),
            diagnostics: 0,
            errors: 0,
            warnings: 0,
            tiers: TierCounts::default(),
            fixable: 0,
            rules: Vec::new(),
            hotspots: Vec::new(),
        };
        let mut rules: HashMap<&str, RuleCount> = HashMap::new();

        for file in files {
            for diagnostic in &file.diagnostics {
                summary.diagnostics += 1;
                match diagnostic.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                }

                let tier = risk.classify(&diagnostic.rule_id, diagnostic.severity);
                summary.tiers.bump(tier);

                let fixable = rewriter.has_remedy(&diagnostic.rule_id);
                if fixable {
                    summary.fixable += 1;
                }

                let entry = rules
                    .entry(diagnostic.rule_id.as_str())
                    .or_insert_with(|| RuleCount {
                        rule_id: diagnostic.rule_id.clone(),
                        tier,
                        count: 0,
                        fixable,
                    });
                entry.count += 1;
                entry.tier = entry.tier.max(tier);
            }

            if !file.diagnostics.is_empty() {
                summary.hotspots.push(FileCount {
                    path: file.path.clone(),
                    count: file.diagnostics.len(),
                });
            }
        }

        summary.rules = rules.into_values().collect();
        summary.rules.sort_by(|a, b| {
            b.tier
                .cmp(&a.tier)
                .then(b.count.cmp(&a.count))
                .then_with(|| a.rule_id.cmp(&b.rule_id))
        });
        summary
            .hotspots
            .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.path.cmp(&b.path)));

        summary
    }
}
