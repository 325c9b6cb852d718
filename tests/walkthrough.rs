use docwright::ooxml::docx::writer::BlockKind;
use docwright::walkthrough::{self, DEFAULT_OUTPUT_NAME, TITLE};
use docwright::{DocxReader, Serializer};
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_walkthrough_round_trips() {
    let tree = walkthrough::build().expect("build walkthrough");
    let dir = tempdir().expect("create temp dir");

    let path = Serializer::new()
        .serialize_to_path(&tree, dir.path().join(DEFAULT_OUTPUT_NAME))
        .expect("write walkthrough");
    let reader = DocxReader::open(&path).expect("reopen walkthrough");
    let blocks = reader.blocks().expect("read blocks");

    assert_eq!(blocks, tree.resolved_blocks());
    assert_eq!(blocks[0].text(), TITLE);
    assert_eq!(blocks[2].kind, BlockKind::PageBreak);
    assert!(blocks.iter().any(|b| b.text().contains("Temperature (°C)")));
    assert_eq!(
        blocks.last().map(|b| b.kind),
        Some(BlockKind::Paragraph)
    );
    assert_eq!(reader.properties().unwrap().title.as_deref(), Some(TITLE));
}

#[test]
fn test_binary_reports_absolute_path() {
    let dir = tempdir().expect("create temp dir");
    let output = Command::new(env!("CARGO_BIN_EXE_walkthrough"))
        .current_dir(dir.path())
        .output()
        .expect("run walkthrough");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let reported = stdout
        .trim_end()
        .strip_prefix("Document saved successfully to ")
        .expect("success message");
    let reported = std::path::Path::new(reported);
    assert!(reported.is_absolute());

    let target = dir.path().join(DEFAULT_OUTPUT_NAME);
    assert_eq!(
        reported.canonicalize().unwrap(),
        target.canonicalize().unwrap()
    );
}

#[test]
fn test_binary_fails_for_missing_directory() {
    let dir = tempdir().expect("create temp dir");
    let target = dir.path().join("missing").join("walkthrough.docx");
    let output = Command::new(env!("CARGO_BIN_EXE_walkthrough"))
        .arg(&target)
        .output()
        .expect("run walkthrough");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error writing document: "));
    assert!(!stderr.contains("Invalid document content"));
    assert!(!target.exists());
}
