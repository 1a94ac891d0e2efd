//! Tests for workflow configuration resolution

use flow_core::config::{ConfigResolver, HOME_WORKFLOW_FILE, PROJECT_WORKFLOW_FILE};
use flow_core::Error;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn resolver(home: &TempDir) -> ConfigResolver {
    ConfigResolver::new().with_home_dir(Some(home.path().to_path_buf()))
}

#[test]
fn test_explicit_file_wins_over_project_file() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(PROJECT_WORKFLOW_FILE), "").unwrap();
    let explicit = project.path().join("other.org");

    let config = resolver(&home)
        .workflow_file(Some(explicit.to_string_lossy().into_owned()))
        .project_root(Some(project.path().to_path_buf()))
        .resolve()
        .unwrap();

    assert!(config.workflow_file.as_str().ends_with("/other.org"));
}

#[test]
fn test_explicit_file_expands_home() {
    let home = TempDir::new().unwrap();

    let config = resolver(&home)
        .workflow_file(Some("~/notes/tasks.org".to_string()))
        .resolve()
        .unwrap();

    assert_eq!(
        config.workflow_file.to_native(),
        home.path().join("notes").join("tasks.org")
    );
}

#[test]
fn test_existing_project_file_is_used() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(PROJECT_WORKFLOW_FILE), "* TODO A\n").unwrap();

    let config = resolver(&home)
        .project_root(Some(project.path().to_path_buf()))
        .resolve()
        .unwrap();

    assert_eq!(
        config.workflow_file.to_native(),
        project.path().join(PROJECT_WORKFLOW_FILE)
    );
}

#[test]
fn test_missing_project_file_falls_back_to_home() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    let config = resolver(&home)
        .project_root(Some(project.path().to_path_buf()))
        .resolve()
        .unwrap();

    assert_eq!(
        config.workflow_file.to_native(),
        home.path().join(".flow").join("workflow.org")
    );
    assert!(HOME_WORKFLOW_FILE.starts_with("~/"));
}

#[test]
fn test_blank_file_value_counts_as_unset() {
    let home = TempDir::new().unwrap();

    let config = resolver(&home)
        .workflow_file(Some("   ".to_string()))
        .resolve()
        .unwrap();

    assert!(config.workflow_file.as_str().ends_with(".flow/workflow.org"));
}

#[test]
fn test_unresolvable_home_fails_loudly() {
    let err = ConfigResolver::new()
        .with_home_dir(None)
        .resolve()
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Fs(flow_fs::Error::HomeDirectoryUnresolved { .. })
    ));
}

#[test]
fn test_absolute_path_needs_no_home() {
    let project = TempDir::new().unwrap();
    let file = project.path().join("tasks.org");

    let config = ConfigResolver::new()
        .with_home_dir(None)
        .workflow_file(Some(file.to_string_lossy().into_owned()))
        .resolve()
        .unwrap();

    assert_eq!(config.workflow_file.to_native(), file);
}

#[test]
fn test_states_and_timeout_overrides() {
    let home = TempDir::new().unwrap();

    let config = resolver(&home)
        .states(Some("OPEN,CLOSED".to_string()))
        .lock_timeout_ms(Some("1500".to_string()))
        .resolve()
        .unwrap();

    assert_eq!(config.states.iter().collect::<Vec<_>>(), ["OPEN", "CLOSED"]);
    assert_eq!(config.robustness.lock_timeout, Duration::from_millis(1500));
    assert!(config.robustness.enable_fsync);
}

#[test]
fn test_defaults_without_overrides() {
    let home = TempDir::new().unwrap();

    let config = resolver(&home).resolve().unwrap();

    assert_eq!(config.states.len(), 6);
    assert_eq!(config.robustness.lock_timeout, Duration::from_secs(5));
}

#[test]
fn test_bad_timeout_is_invalid_config() {
    let home = TempDir::new().unwrap();

    let err = resolver(&home)
        .lock_timeout_ms(Some("-3".to_string()))
        .resolve()
        .unwrap_err();

    match err {
        Error::InvalidConfig { key, .. } => assert_eq!(key, "FLOW_LOCK_TIMEOUT_MS"),
        other => panic!("Expected InvalidConfig, got {other:?}"),
    }
}
