//! Tests for loading configuration files.

use std::io::Write;
use std::path::{Path, PathBuf};

use nova_core::AppConfig;
use nova_core::nova_tictactoe::Difficulty;
use tempfile::NamedTempFile;

#[test]
fn test_load_explicit_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(
        file,
        "db_path = \"custom.db\"\ndifficulty = \"medium\"\nai_delay_ms = 0\nexport_path = \"out.json\""
    )
    .expect("Write failed");

    let config = AppConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(config.db_path(), &PathBuf::from("custom.db"));
    assert_eq!(*config.difficulty(), Difficulty::Medium);
    assert_eq!(*config.ai_delay_ms(), 0);
    assert_eq!(*config.history_limit(), 10);
    assert_eq!(config.export_path(), Path::new("out.json"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let err = AppConfig::from_file("/definitely/not/nova_core.toml").expect_err("Should fail");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_difficulty_is_case_insensitive_in_env() {
    let config = AppConfig::default()
        .apply_env(|key| (key == nova_core::ENV_AI_LEVEL).then(|| "EASY".to_string()))
        .expect("Override failed");
    assert_eq!(*config.difficulty(), Difficulty::Easy);
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(*config.difficulty(), Difficulty::Hard);
    assert_eq!(*config.ai_delay_ms(), 800);
    assert_eq!(config.db_path(), Path::new("nova_core.db"));
}
