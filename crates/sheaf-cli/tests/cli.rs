//! End-to-end tests of the `sheaf` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sheaf(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sheaf").unwrap();
    cmd.arg("--no-color")
        .arg("--cwd")
        .arg(root)
        .env_remove("NODE_ENV")
        .env_remove("SHEAF_ENV")
        .env_remove("SHEAF_OUT_DIR")
        .env_remove("SHEAF_FORMAT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn calculator_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/calculator/a.js", "exports.a = 1;\n");
    write(temp.path(), "src/calculator/b.js", "exports.b = 2;\n");
    write(temp.path(), "src/utils/calculator/b.js", "exports.b = 3;\n");
    write(temp.path(), "src/utils/calculator/c.js", "exports.c = 4;\n");
    temp
}

fn plan_json(root: &Path, extra: &[&str]) -> serde_json::Value {
    let output = sheaf(root).arg("plan").args(extra).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_plan_prints_one_job_per_unique_name() {
    let temp = calculator_project();
    let plan = plan_json(temp.path(), &[]);

    let jobs = plan["jobs"].as_array().unwrap();
    let names: Vec<_> = jobs.iter().map(|j| j["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["a.js", "b.js", "c.js"]);
    assert_eq!(jobs[1]["input"], "src/calculator/b.js");
    assert_eq!(jobs[1]["output"], "build/b.js");
    assert_eq!(plan["env"], "development");

    let stages: Vec<_> = jobs[0]["stages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(stages, ["resolve", "commonjs", "babel", "size-snapshot"]);
}

#[test]
fn test_plan_is_stable_across_runs() {
    let temp = calculator_project();
    assert_eq!(plan_json(temp.path(), &[]), plan_json(temp.path(), &[]));
}

#[test]
fn test_plan_env_flag_beats_node_env() {
    let temp = calculator_project();
    let output = sheaf(temp.path())
        .env("NODE_ENV", "test")
        .args(["plan", "--env", "production"])
        .output()
        .unwrap();
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["env"], "production");
    assert_eq!(plan["options"]["strip_test_attributes"], true);

    let output = sheaf(temp.path())
        .env("NODE_ENV", "test")
        .arg("plan")
        .output()
        .unwrap();
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["env"], "test");
    assert_eq!(plan["options"]["strip_test_attributes"], false);
}

#[test]
fn test_plan_writes_out_file() {
    let temp = calculator_project();
    let out = temp.path().join("plan.json");

    sheaf(temp.path())
        .args(["plan", "--format", "esm", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Plan written to"));

    let plan: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(plan["jobs"][0]["format"], "esm");
}

#[test]
fn test_plan_rejects_invalid_pattern() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "sheaf.toml", "[[groups]]\npattern = \"src/[*.js\"\n");

    sheaf(temp.path())
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid glob pattern"));
}

#[test]
fn test_check_reports_shadowed_entries() {
    let temp = calculator_project();
    sheaf(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("'b.js' in src/utils/calculator is shadowed"))
        .stderr(predicate::str::contains("All checks passed: 3 entries"));
}

fn colored_check(root: &Path, extra: &[&str]) -> String {
    let output = Command::cargo_bin("sheaf")
        .unwrap()
        .args(extra)
        .arg("--cwd")
        .arg(root)
        .arg("check")
        .env_remove("NO_COLOR")
        .env_remove("NODE_ENV")
        .env_remove("RUST_LOG")
        .env("FORCE_COLOR", "1")
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stderr).unwrap()
}

#[test]
fn test_no_color_flag_strips_ansi_escapes() {
    let temp = calculator_project();

    let colored = colored_check(temp.path(), &[]);
    assert!(colored.contains('\x1b'), "{colored:?}");

    let plain = colored_check(temp.path(), &["--no-color"]);
    assert!(!plain.contains('\x1b'), "{plain:?}");
    assert!(plain.contains("✓ All checks passed: 3 entries"));
}

#[test]
fn test_check_fails_for_missing_config_file() {
    let temp = calculator_project();
    sheaf(temp.path())
        .args(["check", "--config"])
        .arg(temp.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_triage_allows_known_warning() {
    let temp = calculator_project();
    sheaf(temp.path())
        .arg("triage")
        .write_stdin("'React' is imported from external module 'react' but never used\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 diagnostics checked, 1 allow-listed"));
}

#[test]
fn test_triage_fails_on_unknown_warning() {
    let temp = calculator_project();
    sheaf(temp.path())
        .arg("triage")
        .write_stdin(concat!(
            "'React' is imported from external module 'react' but never used\n",
            "Mixing named and default exports\n",
            "never reached\n",
        ))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mixing named and default exports"))
        .stderr(predicate::str::contains("never reached").not());
}

#[test]
fn test_triage_uses_configured_allow_list() {
    let temp = calculator_project();
    write(
        temp.path(),
        "sheaf.toml",
        "[diagnostics]\nallow = [\"has been rewritten\"]\n",
    );
    write(
        temp.path(),
        "warnings.log",
        concat!(
            r#"{"message":"`this` has been rewritten to `undefined`","#,
            r#""code":"THIS_IS_UNDEFINED"}"#,
            "\n",
            "'React' is imported from external module 'react' but never used\n",
        ),
    );

    sheaf(temp.path())
        .args(["triage", "--input"])
        .arg(temp.path().join("warnings.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("but never used"));
}

#[test]
fn test_size_requires_built_artifacts() {
    let temp = calculator_project();
    sheaf(temp.path())
        .arg("size")
        .assert()
        .failure()
        .stderr(predicate::str::contains("artifact not found"));
}

#[test]
fn test_size_writes_snapshot() {
    let temp = calculator_project();
    for name in ["a.js", "b.js", "c.js"] {
        write(temp.path(), &format!("build/{name}"), "module.exports = {};\n");
    }

    sheaf(temp.path())
        .arg("size")
        .assert()
        .success()
        .stderr(predicate::str::contains("Size snapshot written to .size-snapshot.json"));

    let snapshot: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join(".size-snapshot.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(snapshot["a.js"]["bundled"], 21);

    sheaf(temp.path())
        .arg("size")
        .assert()
        .success()
        .stderr(predicate::str::contains("Sizes match the snapshot"));
}

#[test]
fn test_init_then_check() {
    let temp = calculator_project();
    sheaf(temp.path()).arg("init").assert().success();
    assert!(temp.path().join("sheaf.toml").is_file());

    sheaf(temp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    sheaf(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("sheaf.toml"));
}

#[test]
fn test_schema_prints_json_schema() {
    let temp = TempDir::new().unwrap();
    let output = sheaf(temp.path()).arg("schema").output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["title"], "SheafConfig");
}
