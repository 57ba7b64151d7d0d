use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_pagesift"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "pagesift init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config_path = dir.path().join(".pagesift.toml");
    assert!(config_path.exists(), ".pagesift.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[ingest]"));
    assert!(content.contains("[index]"));
    assert!(content.contains("[embedding]"));

    // Verify it's valid TOML that pagesift-core can parse
    let _config: pagesift_core::SiftConfig = toml::from_str(&content).unwrap();
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".pagesift.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_pagesift"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
}
