//! Smoke tests for the dbkeep binary: ensure → open → close against a
//! temporary working directory.

use assert_cmd::Command;

#[test]
fn test_binary_creates_database_and_log_directory() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("dbkeep")
        .unwrap()
        .current_dir(dir.path())
        .arg("test.db")
        .assert()
        .success();

    assert!(dir.path().join("test.db").exists());
    assert!(dir.path().join("logs").is_dir());
}

#[test]
fn test_binary_is_idempotent_across_runs() {
    let dir = tempfile::tempdir().unwrap();

    for _ in 0..2 {
        Command::cargo_bin("dbkeep")
            .unwrap()
            .current_dir(dir.path())
            .arg("test.db")
            .assert()
            .success();
    }

    assert!(dir.path().join("test.db").exists());
}

#[test]
fn test_binary_uses_configured_default_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("dbkeep.toml"),
        "[database]\npath = \"configured.db\"\n",
    )
    .unwrap();

    Command::cargo_bin("dbkeep")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("configured.db").exists());
}

#[test]
fn test_binary_fails_on_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("dbkeep")
        .unwrap()
        .current_dir(dir.path())
        .arg("/nonexistent/path/test.db")
        .assert()
        .failure();
}
