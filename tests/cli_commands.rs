use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

const FIXTURE: &str = "tests/fixtures/application.html";

fn formfill(config_dir: &Path) -> Command {
    let bin = assert_cmd::cargo::cargo_bin!("formfill");
    let mut cmd = Command::new(bin);
    // point at a config file that does not exist so local files never leak in
    cmd.arg("--config")
        .arg(config_dir.join("formfill.yaml"))
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("utf8 output");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn fill_prints_summary_and_writes_page() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("filled.html");

    let assert = formfill(dir.path())
        .args(["--format", "json", "fill", FIXTURE, "--output"])
        .arg(&out)
        .assert()
        .success();
    let summary = stdout_json(assert.get_output());

    assert_eq!(summary["detected"], 4);
    assert_eq!(summary["filled"], 4);
    let fields: Vec<&str> = summary["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["firstName", "lastName", "email", "state"]);

    let page = fs::read_to_string(&out).unwrap();
    assert!(page.contains(r#"value="John""#));
    assert!(page.contains(r#"value="john.doe@email.com""#));
    assert!(page.contains(r#"<option value="California" selected>"#));
    assert!(page.contains(r#"data-autofilled="true""#));
}

#[test]
fn fill_with_named_profile_from_yaml_book() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("book.yaml");
    fs::write(
        &book,
        r#"
currentProfile: ada
profiles:
  ada:
    name: Ada
    personalInfo:
      firstName: Ada
      email: ada@example.com
  grace:
    name: Grace
    personalInfo:
      firstName: Grace
"#,
    )
    .unwrap();

    let assert = formfill(dir.path())
        .args(["--format", "json", "fill", FIXTURE, "--profile", "grace", "--profile-book"])
        .arg(&book)
        .assert()
        .success();
    let summary = stdout_json(assert.get_output());
    assert_eq!(summary["detected"], 4);
    assert_eq!(summary["filled"], 1);
    assert_eq!(summary["fields"][0], "firstName");
}

#[test]
fn fill_human_output_reports_status() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("empty.html");
    fs::write(&page, "<p>nothing to fill</p>").unwrap();

    let assert = formfill(dir.path())
        .arg("fill")
        .arg(&page)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("No fillable fields found"));
}

#[test]
fn unknown_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    formfill(dir.path())
        .args(["fill", FIXTURE, "--profile", "nobody"])
        .assert()
        .failure();
}

#[test]
fn detect_lists_controls_with_exclusions() {
    let dir = tempfile::tempdir().unwrap();
    let assert = formfill(dir.path())
        .args(["--format", "json", "detect", FIXTURE, "--candidates"])
        .assert()
        .success();
    let reports = stdout_json(assert.get_output());
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 5);

    assert_eq!(reports[2]["selector"], "#email");
    assert_eq!(reports[2]["detection"]["fieldType"], "email");
    assert_eq!(reports[2]["detection"]["method"], "autocomplete");
    assert!(!reports[2]["candidates"].as_array().unwrap().is_empty());

    assert_eq!(reports[4]["selector"], "#about");
    assert!(reports[4].get("detection").is_none());
    assert_eq!(reports[4]["excluded"], "interviewPrompt");
}

#[test]
fn profiles_lists_bundled_book() {
    let dir = tempfile::tempdir().unwrap();
    let assert = formfill(dir.path())
        .args(["--format", "json", "profiles"])
        .assert()
        .success();
    let listing = stdout_json(assert.get_output());
    let listing = listing.as_array().unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[1]["key"], "software-engineer");
    assert_eq!(listing[1]["current"], true);
}

#[test]
fn config_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    formfill(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("formfill.yaml").exists());

    formfill(dir.path())
        .args(["config", "init"])
        .assert()
        .failure();

    let assert = formfill(dir.path())
        .args(["config", "validate"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("is valid"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("formfill.yaml"), "classifier:\n  min_confidence: 150\n").unwrap();
    formfill(dir.path())
        .args(["config", "validate"])
        .assert()
        .failure();
}

#[test]
fn info_prints_version() {
    let dir = tempfile::tempdir().unwrap();
    let assert = formfill(dir.path()).arg("info").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    assert!(stdout.contains("Field types:    18"));
}
