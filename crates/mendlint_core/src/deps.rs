//! Line-targeted fixer for missing hook dependencies.
//!
//! The file is handled as an ordered list of lines. A diagnostic's 1-based
//! line picks the one line to edit, and only its bracketed list changes.
//! Lines are joined back with `\n`, so `\r` endings stay attached to their
//! line and the line count never changes.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::error::SkipReason;

pub const EXHAUSTIVE_DEPS: &str = "react-hooks/exhaustive-deps";

static MISSING_DEPENDENCY: OnceLock<Regex> = OnceLock::new();
static QUOTED_NAME: OnceLock<Regex> = OnceLock::new();
static LIST: OnceLock<Regex> = OnceLock::new();

fn missing_dependency_re() -> &'static Regex {
    MISSING_DEPENDENCY.get_or_init(|| {
        Regex::new(r"missing dependenc(?:y|ies): ((?:'[^']+'(?:,? and |, )?)+)")
            .expect("Invalid missing dependency pattern")
    })
}

fn quoted_name_re() -> &'static Regex {
    QUOTED_NAME.get_or_init(|| Regex::new(r"'([^']+)'").expect("Invalid quoted name pattern"))
}

fn list_re() -> &'static Regex {
    LIST.get_or_init(|| Regex::new(r"\[([^\[\]]*)\]").expect("Invalid list pattern"))
}

/// Extracts the missing dependency names from an exhaustive-deps message.
///
/// Handles both `has a missing dependency: 'a'` and
/// `has missing dependencies: 'a', 'b', and 'c'`.
pub fn extract_missing_dependencies(message: &str) -> Option<Vec<String>> {
    let caps = missing_dependency_re().captures(message)?;
    let names: Vec<String> = quoted_name_re()
        .captures_iter(caps.get(1)?.as_str())
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();
    if names.is_empty() { None } else { Some(names) }
}

/// What happened to one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchStatus {
    /// At least one name was inserted.
    Inserted(usize),
    /// Every name was already in the list.
    AlreadyPresent,
    Skipped(SkipReason),
}

/// Outcome of patching one file.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyOutcome {
    pub text: String,
    /// Number of names inserted.
    pub inserted: usize,
    /// Per-diagnostic status, in input order.
    pub statuses: Vec<(Diagnostic, PatchStatus)>,
}

impl DependencyOutcome {
    /// Diagnostics that could not be patched, with the reason.
    pub fn skipped(&self) -> impl Iterator<Item = (&Diagnostic, &SkipReason)> {
        self.statuses.iter().filter_map(|(d, s)| match s {
            PatchStatus::Skipped(reason) => Some((d, reason)),
            _ => None,
        })
    }
}

/// Whether a diagnostic belongs to the dependency-array patcher.
pub fn is_dependency_diagnostic(diagnostic: &Diagnostic) -> bool {
    diagnostic.rule_id == EXHAUSTIVE_DEPS
}

/// Inserts missing dependencies reported by `diagnostics` into `text`.
///
/// Diagnostics of other rules are ignored. Diagnostics are applied in
/// the order given; several hitting the same line see each other's edits.
pub fn patch_dependencies(text: &str, diagnostics: &[Diagnostic]) -> DependencyOutcome {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let mut inserted = 0;
    let mut statuses = Vec::new();

    for diagnostic in diagnostics.iter().filter(|d| is_dependency_diagnostic(d)) {
        let status = patch_one(&mut lines, diagnostic);
        match &status {
            PatchStatus::Inserted(n) => inserted += n,
            PatchStatus::AlreadyPresent => {
                debug!("Dependencies already present at line {}", diagnostic.line)
            }
            PatchStatus::Skipped(reason) => warn!(
                "Skipping {}:{}:{}: {}",
                diagnostic.file_path.display(),
                diagnostic.line,
                diagnostic.column,
                reason
            ),
        }
        statuses.push((diagnostic.clone(), status));
    }

    let text = if inserted > 0 {
        lines.join("\n")
    } else {
        text.to_string()
    };

    DependencyOutcome {
        text,
        inserted,
        statuses,
    }
}

fn patch_one(lines: &mut [String], diagnostic: &Diagnostic) -> PatchStatus {
    let Some(names) = extract_missing_dependencies(&diagnostic.message) else {
        return PatchStatus::Skipped(SkipReason::UnresolvedDependencyName);
    };

    let line_count = lines.len();
    let Some(line) = diagnostic
        .line
        .checked_sub(1)
        .and_then(|index| lines.get_mut(index))
    else {
        return PatchStatus::Skipped(SkipReason::OutOfRangeLine {
            line: diagnostic.line,
            line_count,
        });
    };

    let mut count = 0;
    for name in &names {
        match insert_dependency(line, name) {
            Some(updated) => {
                debug!("Inserted dependency '{}' at line {}", name, diagnostic.line);
                *line = updated;
                count += 1;
            }
            None if list_contains(line, name) => {}
            None => return PatchStatus::Skipped(SkipReason::NoMatchingShape),
        }
    }

    if count > 0 {
        PatchStatus::Inserted(count)
    } else {
        PatchStatus::AlreadyPresent
    }
}

/// Returns the edited line, or `None` when the line has no list or already
/// lists `name`.
///
/// Only the last bracketed list on the line is considered, since the
/// dependency list closes the hook call. Inner literals such as
/// `setItems([])` earlier on the line are never touched.
pub fn insert_dependency(line: &str, name: &str) -> Option<String> {
    let inner = last_list(line)?;
    if split_elements(inner.as_str()).any(|e| e == name) {
        return None;
    }

    if inner.as_str().trim().is_empty() {
        return Some(format!(
            "{}{}{}",
            &line[..inner.start()],
            name,
            &line[inner.end()..]
        ));
    }

    // Insert after the last element, keeping inner padding and dropping a
    // trailing comma so the result reads `[a, b, c]`.
    let body = inner.as_str().trim_end();
    let padding = &inner.as_str()[body.len()..];
    let body = body.strip_suffix(',').unwrap_or(body).trim_end();
    Some(format!(
        "{}{}, {}{}{}",
        &line[..inner.start()],
        body,
        name,
        padding,
        &line[inner.end()..]
    ))
}

fn last_list(line: &str) -> Option<regex::Match<'_>> {
    list_re().captures_iter(line).last()?.get(1)
}

fn list_contains(line: &str, name: &str) -> bool {
    last_list(line).is_some_and(|inner| split_elements(inner.as_str()).any(|e| e == name))
}

fn split_elements(inner: &str) -> impl Iterator<Item = &str> {
    inner.split(',').map(str::trim).filter(|e| !e.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn missing(line: usize, name: &str) -> Diagnostic {
        Diagnostic::new(
            "src/App.tsx",
            EXHAUSTIVE_DEPS,
            Severity::Warning,
            line,
            6,
            format!(
                "React Hook useEffect has a missing dependency: '{}'. Either include it or remove the dependency array.",
                name
            ),
        )
    }

    #[rstest]
    #[case::singular(
        "React Hook useEffect has a missing dependency: 'load'. Either include it or remove the dependency array.",
        vec!["load"]
    )]
    #[case::two(
        "React Hook useCallback has missing dependencies: 'a' and 'b'. Either include them or remove the dependency array.",
        vec!["a", "b"]
    )]
    #[case::three(
        "React Hook useMemo has missing dependencies: 'a', 'b', and 'props.c'. Either include them or remove the dependency array.",
        vec!["a", "b", "props.c"]
    )]
    fn test_extract_missing_dependencies(#[case] message: &str, #[case] expected: Vec<&str>) {
        assert_eq!(extract_missing_dependencies(message).unwrap(), expected);
    }

    #[rstest]
    #[case::unnecessary("React Hook useEffect has an unnecessary dependency: 'x'.")]
    #[case::no_quotes("React Hook useEffect has a missing dependency: load.")]
    #[case::other("React Hook useEffect received a function whose dependencies are unknown.")]
    fn test_extract_rejects_other_shapes(#[case] message: &str) {
        assert_eq!(extract_missing_dependencies(message), None);
    }

    #[test]
    fn test_fills_empty_list() {
        let outcome = patch_dependencies("useEffect(() => { load(); }, []);", &[missing(1, "load")]);
        assert_eq!(outcome.text, "useEffect(() => { load(); }, [load]);");
        assert_eq!(outcome.inserted, 1);
    }

    #[test]
    fn test_appends_to_filled_list() {
        let outcome = patch_dependencies("}, [a, b]);", &[missing(1, "c")]);
        assert_eq!(outcome.text, "}, [a, b, c]);");
        assert_eq!(outcome.inserted, 1);
    }

    #[test]
    fn test_reapplying_does_not_duplicate() {
        let diags = [missing(1, "c")];
        let first = patch_dependencies("}, [a, b]);", &diags);
        let second = patch_dependencies(&first.text, &diags);
        assert_eq!(second.text, "}, [a, b, c]);");
        assert_eq!(second.inserted, 0);
        assert_eq!(second.statuses[0].1, PatchStatus::AlreadyPresent);
    }

    #[test]
    fn test_reapplying_after_empty_fill_does_not_duplicate() {
        let diags = [missing(1, "load")];
        let first = patch_dependencies("}, []);", &diags);
        let second = patch_dependencies(&first.text, &diags);
        assert_eq!(second.text, "}, [load]);");
        assert_eq!(second.inserted, 0);
    }

    #[rstest]
    #[case::padded("}, [ a, b ]);", "}, [ a, b, c ]);")]
    #[case::trailing_comma("}, [a, b,]);", "}, [a, b, c]);")]
    #[case::spaced_empty("}, [ ]);", "}, [c]);")]
    #[case::last_list_wins("const x = pick([1, 2]); }, [a]);", "const x = pick([1, 2]); }, [a, c]);")]
    #[case::last_list_empty("setItems([a]); }, []);", "setItems([a]); }, [c]);")]
    #[case::inner_empty_literal("setItems([]); }, [a]);", "setItems([]); }, [a, c]);")]
    fn test_insert_dependency_shapes(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(insert_dependency(line, "c").unwrap(), expected);
    }

    #[test]
    fn test_inner_empty_literal_is_left_alone_on_rerun() {
        let diags = [missing(1, "load")];
        let text = "useEffect(() => { setItems([]); load(); }, []);";
        let first = patch_dependencies(text, &diags);
        assert_eq!(first.text, "useEffect(() => { setItems([]); load(); }, [load]);");

        let second = patch_dependencies(&first.text, &diags);
        assert_eq!(second.text, first.text);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.statuses[0].1, PatchStatus::AlreadyPresent);
    }

    #[test]
    fn test_listed_name_beside_inner_empty_literal() {
        let text = "useEffect(() => { setItems([]); load(); }, [load]);";
        let outcome = patch_dependencies(text, &[missing(1, "load")]);
        assert_eq!(outcome.text, text);
        assert_eq!(outcome.inserted, 0);
        assert_eq!(outcome.statuses[0].1, PatchStatus::AlreadyPresent);
    }

    #[rstest]
    #[case::inner_empty("useEffect(() => { setItems([]); load(); }, []);")]
    #[case::inner_filled("useEffect(() => { pick([1, 2]); load(); }, [a]);")]
    #[case::nested_inner("useMemo(() => merge([[]], [x]), [x]);")]
    #[case::padded_tail("useEffect(() => { f([], []); }, [ a, ]);")]
    #[case::two_inner_empties("useEffect(() => { a([]); b([]); }, []);")]
    fn test_rerun_on_multi_list_line_inserts_nothing(#[case] line: &str) {
        let diags = [missing(1, "load"), missing(1, "extra")];
        let first = patch_dependencies(line, &diags);
        assert_eq!(first.inserted, 2);

        let second = patch_dependencies(&first.text, &diags);
        assert_eq!(second.text, first.text);
        assert_eq!(second.inserted, 0);
    }

    proptest! {
        #[test]
        fn rerun_inserts_nothing(
            inner in prop::collection::vec(prop::collection::vec("[a-z]{1,3}", 0..3), 0..4),
            deps in prop::collection::vec("[a-z]{1,3}", 0..3),
            name in "[a-z]{1,3}",
        ) {
            let calls: Vec<String> = inner
                .iter()
                .map(|items| format!("f([{}]);", items.join(", ")))
                .collect();
            let line = format!(
                "useEffect(() => {{ {} }}, [{}]);",
                calls.join(" "),
                deps.join(", ")
            );
            let diags = [missing(1, &name)];

            let first = patch_dependencies(&line, &diags);
            let second = patch_dependencies(&first.text, &diags);
            prop_assert_eq!(second.inserted, 0);
            prop_assert_eq!(&second.text, &first.text);
        }
    }

    #[test]
    fn test_targets_only_reported_line() {
        let text = "useEffect(() => {\n  load();\n}, []);\nconst other = [];";
        let outcome = patch_dependencies(text, &[missing(3, "load")]);
        assert_eq!(
            outcome.text,
            "useEffect(() => {\n  load();\n}, [load]);\nconst other = [];"
        );
    }

    #[test]
    fn test_out_of_range_line() {
        let text = "}, []);\n";
        let outcome = patch_dependencies(text, &[missing(40, "load")]);
        assert_eq!(outcome.text, text);
        assert_eq!(
            outcome.statuses[0].1,
            PatchStatus::Skipped(SkipReason::OutOfRangeLine {
                line: 40,
                line_count: 2
            })
        );
    }

    #[test]
    fn test_line_zero_is_out_of_range() {
        let outcome = patch_dependencies("}, []);", &[missing(0, "load")]);
        assert!(matches!(
            outcome.statuses[0].1,
            PatchStatus::Skipped(SkipReason::OutOfRangeLine { line: 0, .. })
        ));
    }

    #[test]
    fn test_no_matching_shape() {
        let text = "useEffect(() => {\n  load();\n});";
        let outcome = patch_dependencies(text, &[missing(2, "load")]);
        assert_eq!(outcome.text, text);
        assert_eq!(
            outcome.statuses[0].1,
            PatchStatus::Skipped(SkipReason::NoMatchingShape)
        );
    }

    #[test]
    fn test_unresolved_name() {
        let mut diag = missing(1, "load");
        diag.message = "React Hook useEffect has an unnecessary dependency: 'x'.".to_string();
        let outcome = patch_dependencies("}, [x]);", &[diag]);
        assert_eq!(outcome.text, "}, [x]);");
        assert_eq!(
            outcome.statuses[0].1,
            PatchStatus::Skipped(SkipReason::UnresolvedDependencyName)
        );
        assert_eq!(outcome.skipped().count(), 1);
    }

    #[test]
    fn test_multiple_diagnostics_same_line_in_order() {
        let outcome = patch_dependencies("}, []);", &[missing(1, "a"), missing(1, "b")]);
        assert_eq!(outcome.text, "}, [a, b]);");
        assert_eq!(outcome.inserted, 2);
    }

    #[test]
    fn test_plural_message_inserts_all_names() {
        let mut diag = missing(1, "");
        diag.message =
            "React Hook useEffect has missing dependencies: 'a' and 'b'. Either include them or remove the dependency array."
                .to_string();
        let outcome = patch_dependencies("}, [a]);", &[diag]);
        assert_eq!(outcome.text, "}, [a, b]);");
        assert_eq!(outcome.inserted, 1);
    }

    #[test]
    fn test_preserves_crlf_and_line_count() {
        let text = "useEffect(() => {\r\n  load();\r\n}, []);\r\n";
        let outcome = patch_dependencies(text, &[missing(3, "load")]);
        assert_eq!(outcome.text, "useEffect(() => {\r\n  load();\r\n}, [load]);\r\n");
        assert_eq!(outcome.text.lines().count(), text.lines().count());
    }

    #[test]
    fn test_ignores_other_rules() {
        let mut diag = missing(1, "load");
        diag.rule_id = "no-console".to_string();
        let outcome = patch_dependencies("}, []);", &[diag]);
        assert_eq!(outcome.text, "}, []);");
        assert!(outcome.statuses.is_empty());
    }
}
