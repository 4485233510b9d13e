//! End-to-end tests: ESLint report in, rewritten files out.

use std::fs;
use std::path::Path;

use mendlint_core::{
    FileStatus, MendConfig, RewriteOptions, RewriteTable, Rewriter, SkipReason, StageEdits,
    load_report, rewrite_report,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn report_json(entries: &[(&Path, &str)]) -> String {
    let groups: Vec<String> = entries
        .iter()
        .map(|(path, messages)| {
            format!(
                r#"{{"filePath": {}, "messages": [{}], "errorCount": 0, "warningCount": 0}}"#,
                serde_json::to_string(&path.to_string_lossy()).unwrap(),
                messages
            )
        })
        .collect();
    format!("[{}]", groups.join(","))
}

const ANY_AT_1_13: &str = r#"{"ruleId": "@typescript-eslint/no-explicit-any", "severity": 2, "message": "Unexpected any. Specify a different type.", "line": 1, "column": 13}"#;

#[test]
fn test_explicit_any_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("data.ts");
    fs::write(&file, "const data: any = response;").unwrap();

    let report = load_report(&report_json(&[(&file, ANY_AT_1_13)])).unwrap();
    let table = RewriteTable::builtin();
    let rewriter = Rewriter::new(&table, RewriteOptions::default());

    let results = rewrite_report(&report, &rewriter);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, FileStatus::Written);
    assert_eq!(
        results[0].edits,
        StageEdits {
            sanitized: 0,
            patterns: 1,
            dependencies: 0
        }
    );
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "const data: unknown = response;"
    );
}

#[test]
fn test_second_run_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let hook = temp_dir.path().join("Hook.tsx");
    fs::write(
        &hook,
        "export function useThing(load: any) {\n  useEffect(() => {\n    load();\n  }, []);\n}\n",
    )
    .unwrap();

    let messages = r#"
        {"ruleId": "@typescript-eslint/no-explicit-any", "severity": 1, "message": "Unexpected any.", "line": 1, "column": 32},
        {"ruleId": "react-hooks/exhaustive-deps", "severity": 1, "message": "React Hook useEffect has a missing dependency: 'load'. Either include it or remove the dependency array.", "line": 4, "column": 6}
    "#;
    let report = load_report(&report_json(&[(&hook, messages)])).unwrap();
    let table = RewriteTable::builtin();
    let rewriter = Rewriter::new(&table, RewriteOptions::default());

    let first = rewrite_report(&report, &rewriter);
    assert_eq!(first[0].status, FileStatus::Written);
    assert_eq!(first[0].edits.patterns, 1);
    assert_eq!(first[0].edits.dependencies, 1);
    let expected =
        "export function useThing(load: unknown) {\n  useEffect(() => {\n    load();\n  }, [load]);\n}\n";
    assert_eq!(fs::read_to_string(&hook).unwrap(), expected);

    let second = rewrite_report(&report, &rewriter);
    assert_eq!(second[0].status, FileStatus::Unchanged);
    assert_eq!(second[0].edits.total(), 0);
    assert_eq!(second[0].skipped.len(), 1);
    assert_eq!(second[0].skipped[0].reason, SkipReason::NoPatternMatch);
    assert_eq!(fs::read_to_string(&hook).unwrap(), expected);
}

#[test]
fn test_unfixable_report_leaves_files_alone() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("log.ts");
    fs::write(&file, "console.log(value);\n").unwrap();

    let messages = r#"{"ruleId": "no-console", "severity": 1, "message": "Unexpected console statement.", "line": 1, "column": 1}"#;
    let report = load_report(&report_json(&[(&file, messages)])).unwrap();
    let table = RewriteTable::builtin();
    let rewriter = Rewriter::new(&table, RewriteOptions::default());

    let results = rewrite_report(&report, &rewriter);
    assert_eq!(results[0].status, FileStatus::Unchanged);
    assert_eq!(results[0].skipped.len(), 1);
    assert_eq!(results[0].skipped[0].reason, SkipReason::NoRemedy);
    assert_eq!(fs::read_to_string(&file).unwrap(), "console.log(value);\n");
}

#[test]
fn test_io_failure_does_not_stop_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("gone.ts");
    let present = temp_dir.path().join("here.ts");
    fs::write(&present, "const data: any = response;").unwrap();

    let report = load_report(&report_json(&[
        (&missing, ANY_AT_1_13),
        (&present, ANY_AT_1_13),
    ]))
    .unwrap();
    let table = RewriteTable::builtin();
    let rewriter = Rewriter::new(&table, RewriteOptions::default());

    let results = rewrite_report(&report, &rewriter);
    assert_eq!(results.len(), 2);
    assert!(results[0].is_failed());
    assert_eq!(results[1].status, FileStatus::Written);
}

#[test]
fn test_config_disables_fixer() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("data.ts");
    fs::write(&file, "const data: any = response;").unwrap();

    let config = MendConfig::from_jsonc(
        r#"{ "disabled_fixers": ["@typescript-eslint/no-explicit-any"] }"#,
    )
    .unwrap();
    let table = config.rewrite_table();
    let rewriter = Rewriter::new(&table, config.rewrite_options().unwrap());

    let report = load_report(&report_json(&[(&file, ANY_AT_1_13)])).unwrap();
    let results = rewrite_report(&report, &rewriter);

    assert_eq!(results[0].status, FileStatus::Unchanged);
    assert_eq!(results[0].skipped[0].reason, SkipReason::NoRemedy);
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "const data: any = response;"
    );
}
