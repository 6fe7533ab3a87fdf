use clap::Parser;
use formscope::DefaultsSource;
use formscope_cli::{inspect, Args};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();
    path
}

fn args(dir: &TempDir, extra: &[&str]) -> Args {
    let config = dir.path().join("formscope.toml");
    let mut argv = vec!["formscope".to_string(), "--config".to_string(), config.display().to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::parse_from(argv)
}

#[test]
fn explicit_form_binds_tagged_response() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_json(
        &dir,
        "action.json",
        json!({"fieldErrors": {"email": "required"}, "formIdentityTag": "login"}),
    );
    let defaults = write_json(&dir, "defaults.json", json!({"email": "p"}));
    let report = inspect(&args(
        &dir,
        &[
            "--form-id", "login",
            "--action-data", data.to_str().unwrap(),
            "--defaults", defaults.to_str().unwrap(),
        ],
    ))
    .unwrap();

    assert!(report.explicit);
    assert!(report.matched);
    assert_eq!(report.field_errors["email"], "required");
    assert_eq!(report.defaults.source, DefaultsSource::Props);
    assert!(!report.submitting);
}

#[test]
fn generated_form_reports_subaction_rejection() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_json(&dir, "action.json", json!({"fieldErrors": {"a": "b"}, "subaction": "delete"}));
    let report = inspect(&args(
        &dir,
        &["--subaction", "update", "--action-data", data.to_str().unwrap(), "--navigating"],
    ))
    .unwrap();

    assert!(!report.explicit);
    assert!(!report.matched);
    assert!(report.rejection.unwrap().contains("delete"));
    assert!(report.submitting);
}

#[test]
fn hydrated_state_and_channel() {
    let dir = tempfile::tempdir().unwrap();
    let stored = write_json(&dir, "stored.json", json!({"name": "stored"}));
    let report = inspect(&args(
        &dir,
        &["--hydrate", stored.to_str().unwrap(), "--channel", "submitting"],
    ))
    .unwrap();

    assert_eq!(report.defaults.source, DefaultsSource::State);
    assert_eq!(report.defaults.values.get("name"), Some(&json!("stored")));
    assert!(report.submitting);
    assert_eq!(report.rejection.as_deref(), Some("payload carries no field errors"));
}

#[test]
fn unreadable_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let result = inspect(&args(&dir, &["--action-data", missing.to_str().unwrap()]));
    assert!(result.is_err());
}

#[test]
fn report_serializes_for_output() {
    let dir = tempfile::tempdir().unwrap();
    let report = inspect(&args(&dir, &["--form-id", "f"])).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["form_id"], json!("f"));
    assert_eq!(value["defaults"]["source"], json!("props"));
    assert_eq!(value["defaults"]["values"], json!({}));
}
