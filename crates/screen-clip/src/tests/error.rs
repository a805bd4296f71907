use crate::{AppError, config::Config};

use std::error::Error;

/// WHAT: A fresh config directory is created and the file named inside it
/// WHY: First launch has no config directory yet
#[test]
fn given_missing_config_dir_when_resolving_then_created() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("Screen-Clip");

    let path = Config::config_file_in(&config_dir).unwrap();

    assert!(config_dir.is_dir());
    assert_eq!(path, config_dir.join("config.toml"));
}

/// WHAT: Filesystem failures surface as IoError with their cause
/// WHY: The log must show the underlying OS error, not just a message
#[test]
fn given_config_dir_under_a_file_when_resolving_then_io_error() {
    // Given: A plain file where the config directory's parent should be
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    // When: Resolving the config file beneath it
    let result = Config::config_file_in(&blocker.join("Screen-Clip"));

    // Then: IoError carrying the io::Error source
    let error = result.unwrap_err();
    assert!(matches!(error, AppError::IoError { .. }));
    assert!(error.source().is_some());
}
