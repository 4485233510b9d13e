//! Whole-file pattern substitutions keyed by rule id.
//!
//! Each [`RewriteRule`] owns an ordered list of [`Substitution`]s. They are
//! applied to the whole text, one after another, so a later substitution sees
//! the output of the earlier ones. The diagnostic's line and column are not
//! used here: the pattern locates the edit site, which fixes every occurrence
//! of a construct even when only one was reported.
//!
//! Every replacement is shaped so its own pattern can no longer match it,
//! which is what makes a second pass a no-op.

use std::collections::HashSet;

use regex::{Captures, Regex};
use tracing::debug;

use crate::diagnostic::Diagnostic;

pub const NO_EXPLICIT_ANY: &str = "@typescript-eslint/no-explicit-any";
pub const NO_EMPTY_OBJECT_TYPE: &str = "@typescript-eslint/no-empty-object-type";

/// A context check evaluated around each match.
///
/// The `regex` crate has no lookaround, so exclusions live next to the
/// pattern and are checked against the text surrounding a candidate match.
#[derive(Debug, Clone)]
pub enum Guard {
    /// Reject the match when the text after it starts with this pattern.
    NotFollowedBy(Regex),
    /// Reject the match when the text before it ends with this pattern.
    ///
    /// The window starts at the line holding the last non-blank character
    /// before the match, so a construct split across lines is still seen.
    NotPrecededBy(Regex),
}

impl Guard {
    fn not_followed_by(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(&format!("^(?:{})", pattern)).map(Guard::NotFollowedBy)
    }

    fn not_preceded_by(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(&format!("(?:{})$", pattern)).map(Guard::NotPrecededBy)
    }

    fn allows(&self, text: &str, start: usize, end: usize) -> bool {
        match self {
            Guard::NotFollowedBy(re) => !re.is_match(&text[end..]),
            Guard::NotPrecededBy(re) => {
                let before = text[..start].trim_end();
                let line_start = before.rfind('\n').map_or(0, |i| i + 1);
                !re.is_match(&text[line_start..start])
            }
        }
    }
}

/// One (pattern, replacement) pair.
#[derive(Debug, Clone)]
pub struct Substitution {
    /// Short name used in logs.
    pub name: &'static str,
    pattern: Regex,
    /// Replacement template; `$1`/`${1}` expand capture groups.
    replacement: &'static str,
    guards: Vec<Guard>,
}

impl Substitution {
    pub fn new(
        name: &'static str,
        pattern: &str,
        replacement: &'static str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement,
            guards: Vec::new(),
        })
    }

    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Applies the substitution to every allowed match.
    ///
    /// Returns `None` when the text is left as is.
    pub fn apply(&self, text: &str) -> Option<String> {
        let mut changed = false;
        let replaced = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
            let matched = &text[whole.0..whole.1];
            if self.guards.iter().all(|g| g.allows(text, whole.0, whole.1)) {
                let mut out = String::new();
                caps.expand(self.replacement, &mut out);
                if out != matched {
                    changed = true;
                }
                out
            } else {
                matched.to_string()
            }
        });
        if changed {
            Some(replaced.into_owned())
        } else {
            None
        }
    }
}

/// The substitutions registered for one rule id.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub rule_id: &'static str,
    pub substitutions: Vec<Substitution>,
}

/// Outcome of running the table over one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternOutcome {
    pub text: String,
    /// Number of distinct substitutions that changed the text.
    pub applied: usize,
    /// Reported rule ids whose substitutions all left the text as is.
    pub unmatched: Vec<&'static str>,
}

/// Ordered set of rewrite rules.
///
/// Constructed once and passed by reference to the orchestrator.
#[derive(Debug, Clone)]
pub struct RewriteTable {
    rules: Vec<RewriteRule>,
}

impl RewriteTable {
    /// Creates a table from explicit rules, keeping their order.
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// The documented built-in table.
    pub fn builtin() -> Self {
        Self::new(builtin_rules().expect("Invalid builtin rewrite pattern"))
    }

    /// Returns a copy without the given rule ids.
    pub fn without(&self, disabled: &[String]) -> Self {
        Self::new(
            self.rules
                .iter()
                .filter(|r| !disabled.iter().any(|d| d == r.rule_id))
                .cloned()
                .collect(),
        )
    }

    /// Whether a rule id has a registered rewrite.
    pub fn is_fixable(&self, rule_id: &str) -> bool {
        self.get(rule_id).is_some()
    }

    /// Looks up the rule for a rule id.
    pub fn get(&self, rule_id: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|r| r.rule_id == rule_id)
    }

    /// Rule ids in application order.
    pub fn rule_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.rule_id)
    }

    /// Applies every rule whose id appears among `diagnostics`, in table order.
    pub fn apply(&self, text: &str, diagnostics: &[Diagnostic]) -> PatternOutcome {
        let reported: HashSet<&str> = diagnostics.iter().map(|d| d.rule_id.as_str()).collect();

        let mut current = text.to_string();
        let mut applied = 0;
        let mut unmatched = Vec::new();

        for rule in self.rules.iter().filter(|r| reported.contains(r.rule_id)) {
            let before = applied;
            for substitution in &rule.substitutions {
                if let Some(next) = substitution.apply(&current) {
                    debug!("Applied '{}' ({})", substitution.name, rule.rule_id);
                    current = next;
                    applied += 1;
                }
            }
            if applied == before {
                debug!("No pattern matched for {}", rule.rule_id);
                unmatched.push(rule.rule_id);
            }
        }

        PatternOutcome {
            text: current,
            applied,
            unmatched,
        }
    }
}

impl Default for RewriteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_rules() -> Result<Vec<RewriteRule>, regex::Error> {
    // `any` or `{}` running into a longer identifier.
    const IDENT_CONTINUES: &str = r"[\w$]";

    let no_explicit_any = RewriteRule {
        rule_id: NO_EXPLICIT_ANY,
        substitutions: vec![
            Substitution::new("useState generic", r"useState<any>", "useState<unknown>")?,
            Substitution::new("array annotation", r": any\[\]", ": unknown[]")?,
            Substitution::new("annotation", r": any", ": unknown")?
                .guard(Guard::not_followed_by(IDENT_CONTINUES)?)
                .guard(Guard::not_followed_by(r"\s*\)")?),
            Substitution::new(
                "parameter annotation",
                r"([\w$]+\??): any(\s*\))",
                "${1}: unknown${2}",
            )?
            .guard(Guard::not_preceded_by(r"catch\s*\(\s*")?),
            Substitution::new("type alias", r"= any", "= unknown")?
                .guard(Guard::not_followed_by(IDENT_CONTINUES)?),
            Substitution::new("generic argument", r"<any>", "<unknown>")?,
            Substitution::new(
                "catch binding",
                r"catch\s*\(\s*([\w$]+)\s*:\s*any\s*\)",
                "catch (${1}: unknown)",
            )?,
        ],
    };

    let no_empty_object_type = RewriteRule {
        rule_id: NO_EMPTY_OBJECT_TYPE,
        substitutions: vec![
            Substitution::new("annotation", r": \{\}", ": object")?
                .guard(Guard::not_followed_by(IDENT_CONTINUES)?),
            Substitution::new("generic argument", r"<\{\}>", "<object>")?,
            Substitution::new("union member", r"\| \{\}", "| object")?
                .guard(Guard::not_followed_by(IDENT_CONTINUES)?),
            Substitution::new("intersection member", r"& \{\}", "& object")?
                .guard(Guard::not_followed_by(IDENT_CONTINUES)?),
            Substitution::new(
                "type alias",
                r"(\btype\s+[\w$]+\s*=\s*)\{\}",
                "${1}object",
            )?,
            Substitution::new("extends clause", r"(\bextends\s+)\{\}", "${1}object")?,
        ],
    };

    Ok(vec![no_explicit_any, no_empty_object_type])
}
