//! Golden-file test harness for defname.
//!
//! Discovers `<name>.input.<ext>` files under `tests/fixtures/`, runs the
//! pipeline (parse → rewrite → codegen → format), and compares the output
//! against the sibling `<name>.expected.<ext>` file. Two optional siblings
//! refine the check:
//! - `<name>.warnings`: expected diagnostic kinds, one per line, in order
//!   (no file means no diagnostics)
//! - `<name>.error`: the rewrite must fail with a message containing this text
//!
//! Set `DN_UPDATE_FIXTURES=1` to overwrite expected files with actual output.

use std::path::{Path, PathBuf};

use dn_test::{run_pipeline, verify_parses};

fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR is crates/dn_test/, so go up two levels to workspace root.
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
}

fn collect_input_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir(dir)
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains(".input."))
        })
        .collect();
    files.sort();
    files
}

fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut result = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                result.extend(walkdir(&path));
            } else {
                result.push(path);
            }
        }
    }
    result
}

/// `<dir>/<name>.input.<ext>` → `<dir>/<name>.<suffix>`
fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let name = input.file_name().unwrap().to_str().unwrap();
    let stem = &name[..name.find(".input.").unwrap()];
    input.with_file_name(format!("{stem}.{suffix}"))
}

fn expected_path(input: &Path) -> PathBuf {
    let ext = input.extension().unwrap().to_str().unwrap();
    sibling(input, &format!("expected.{ext}"))
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| {
            s.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn check_fixture(fixtures: &Path, input_path: &Path, update_mode: bool) -> Result<(), String> {
    let test_name = input_path
        .strip_prefix(fixtures)
        .unwrap()
        .display()
        .to_string();

    let source = std::fs::read_to_string(input_path)
        .map_err(|e| format!("{test_name}: failed to read input: {e}"))?;

    // The fixture-relative path is what diagnostics see, so filename checks
    // do not depend on where the workspace is checked out.
    let result = run_pipeline(&source, &test_name);

    let error_path = sibling(input_path, "error");
    if error_path.exists() {
        let expected = std::fs::read_to_string(&error_path)
            .map_err(|e| format!("{test_name}: failed to read error file: {e}"))?;
        return match result {
            Ok(_) => Err(format!("{test_name}: expected failure, pipeline succeeded")),
            Err(e) if e.to_string().contains(expected.trim()) => Ok(()),
            Err(e) => Err(format!(
                "{test_name}: wrong error\n--- expected ---\n{}\n--- actual ---\n{e}",
                expected.trim()
            )),
        };
    }

    let output = result.map_err(|e| format!("{test_name}: pipeline failed: {e}"))?;
    let expected_path = expected_path(input_path);
    let warnings_path = sibling(input_path, "warnings");
    let actual_warnings: Vec<String> = output
        .diagnostics
        .iter()
        .map(|d| format!("{:?}", d.kind))
        .collect();

    if update_mode {
        std::fs::write(&expected_path, &output.source)
            .map_err(|e| format!("{test_name}: failed to write expected: {e}"))?;
        if !actual_warnings.is_empty() {
            std::fs::write(&warnings_path, actual_warnings.join("\n") + "\n")
                .map_err(|e| format!("{test_name}: failed to write warnings: {e}"))?;
        } else if warnings_path.exists() {
            std::fs::remove_file(&warnings_path)
                .map_err(|e| format!("{test_name}: failed to remove stale warnings: {e}"))?;
        }
        return Ok(());
    }

    let expected = std::fs::read_to_string(&expected_path).map_err(|e| {
        format!(
            "{test_name}: missing expected file {}: {e}",
            expected_path.display()
        )
    })?;
    if output.source.trim() != expected.trim() {
        return Err(format!(
            "{test_name}: output mismatch\n--- expected ---\n{}\n--- actual ---\n{}",
            expected.trim(),
            output.source.trim()
        ));
    }

    let expected_warnings = read_lines(&warnings_path);
    if actual_warnings != expected_warnings {
        return Err(format!(
            "{test_name}: diagnostics mismatch\n--- expected ---\n{expected_warnings:?}\n--- actual ---\n{:?}",
            output.diagnostics
        ));
    }

    verify_parses(&output.source, &test_name)
        .map_err(|e| format!("{test_name}: output does not parse: {e}"))
}

#[test]
fn golden_file_tests() {
    let fixtures = fixtures_dir();
    let roundtrip = fixtures.join("roundtrip");
    let input_files: Vec<PathBuf> = collect_input_files(&fixtures)
        .into_iter()
        .filter(|path| !path.starts_with(&roundtrip))
        .collect();

    assert!(
        !input_files.is_empty(),
        "No test fixtures found in {}",
        fixtures.display()
    );

    let update_mode = std::env::var("DN_UPDATE_FIXTURES").is_ok();
    let failures: Vec<String> = input_files
        .iter()
        .filter_map(|input| check_fixture(&fixtures, input, update_mode).err())
        .collect();

    if !failures.is_empty() {
        panic!(
            "\n{} golden test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

#[test]
fn roundtrip_tests() {
    let fixtures = fixtures_dir().join("roundtrip");
    let input_files = collect_input_files(&fixtures);

    let mut failures = Vec::new();

    for input_path in &input_files {
        let test_name = input_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read: {e}"));
                continue;
            }
        };

        let output = match run_pipeline(&source, &test_name) {
            Ok(output) => output,
            Err(e) => {
                failures.push(format!("{test_name}: pipeline failed: {e}"));
                continue;
            }
        };

        if let Err(e) = verify_parses(&output.source, &test_name) {
            failures.push(format!(
                "{test_name}: output does not parse: {e}\n--- output ---\n{}",
                output.source.trim()
            ));
            continue;
        }

        // A second pass over already-converted output must be a no-op.
        match run_pipeline(&output.source, &test_name) {
            Ok(again) if again.source == output.source => {}
            Ok(again) => failures.push(format!(
                "{test_name}: second pass changed output\n--- first ---\n{}\n--- second ---\n{}",
                output.source.trim(),
                again.source.trim()
            )),
            Err(e) => failures.push(format!("{test_name}: second pass failed: {e}")),
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} roundtrip test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}
