use std::process::Command;

fn pagesift(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pagesift"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn query_without_query_flag_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = pagesift(dir.path(), &["query"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("query"), "stderr was: {stderr}");
}

#[test]
fn query_without_chunks_file_fails_with_setup_hint() {
    let dir = tempfile::tempdir().unwrap();
    let output = pagesift(dir.path(), &["query", "-q", "anything"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("setup"), "stderr was: {stderr}");
}

#[test]
fn setup_without_export_folder_fails_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let output = pagesift(dir.path(), &["setup"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr was: {stderr}");
}

#[test]
fn setup_writes_chunk_records_before_indexing() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("notion_export");
    std::fs::create_dir(&export).unwrap();
    std::fs::write(
        export.join("Guide 0123456789abcdef0123456789abcdef.md"),
        "# Intro\nwelcome\n\n## Details\nmore text\n",
    )
    .unwrap();
    // Point the embedder at a closed port so indexing cannot accidentally succeed.
    std::fs::write(
        dir.path().join(".pagesift.toml"),
        "[embedding]\nbase_url = \"http://127.0.0.1:9\"\n",
    )
    .unwrap();

    // Chunking happens before embedding, so the chunks file is written even
    // though the embedding endpoint is unreachable.
    let output = pagesift(dir.path(), &["setup"]);
    assert_eq!(output.status.code(), Some(1));

    let chunks_path = dir.path().join("chunks.jsonl");
    assert!(chunks_path.exists(), "chunks.jsonl should exist");
    let content = std::fs::read_to_string(&chunks_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["page"], "Guide");
    assert_eq!(record["page_id"], "0123456789abcdef0123456789abcdef");
    assert_eq!(record["chunk_id"], 1);
    assert_eq!(record["header_path"][0], "Intro");
    assert_eq!(record["header_path"][1], "Details");
}
