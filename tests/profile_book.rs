use std::fs;

use formfill_cli::{load_book, pick_profile, Config};
use formfill_core_types::FieldType;

#[test]
fn json_book_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    fs::write(
        &path,
        r#"{"currentProfile":"x","profiles":{"x":{"name":"X","professional":{"salary":"$1"}}}}"#,
    )
    .unwrap();

    let mut book = load_book(Some(&path)).unwrap();
    let (key, profile) = pick_profile(&mut book, None).unwrap();
    assert_eq!(key, "x");
    assert_eq!(profile.value_for(FieldType::Salary), "$1");
    assert_eq!(profile.value_for(FieldType::Email), "");
}

#[test]
fn malformed_book_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "profiles: [not, a, map]").unwrap();
    let err = load_book(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("broken.yaml"));
}

#[test]
fn missing_book_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_book(Some(&dir.path().join("absent.json"))).is_err());
}

#[test]
fn config_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("formfill.yaml");
    fs::write(
        &path,
        "log_level: warn\nprofile: product-manager\nautofill:\n  settle_indicators: true\n",
    )
    .unwrap();
    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.profile.as_deref(), Some("product-manager"));
    assert!(config.autofill.settle_indicators);
    config.validate().unwrap();
}

#[test]
fn example_config_matches_defaults() {
    let config = Config::from_yaml_str(include_str!("../config/formfill.example.yaml")).unwrap();
    assert_eq!(config, Config::default());
}
