use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn products(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("products").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("PRODUCTS_DATA_FILE")
        .env_remove("PRODUCTS_BIND");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    products(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn init_creates_empty_collection() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("data").join("products.json");

    products(&dir)
        .arg("init")
        .arg("--data-file")
        .arg(&data_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&data_file).unwrap()).unwrap();
    assert_eq!(document, serde_json::json!([]));
}

#[test]
fn init_leaves_existing_document_alone() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("products.json");
    let existing = r#"[{"id":"a","name":"Lamp","created_at":"2024-01-01T00:00:00.000Z","updated_at":"2024-01-01T00:00:00.000Z"}]"#;
    fs::write(&data_file, existing).unwrap();

    products(&dir)
        .args(["init", "--data-file"])
        .arg(&data_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&data_file).unwrap(), existing);
}

#[test]
fn init_uses_config_file_from_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("products.toml"),
        "[storage]\ndata_file = \"catalog.json\"\n",
    )
    .unwrap();

    products(&dir).arg("init").assert().success();

    assert!(dir.path().join("catalog.json").exists());
    assert!(!dir.path().join("products.json").exists());
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    products(&dir)
        .args(["--config", "nope.toml", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
