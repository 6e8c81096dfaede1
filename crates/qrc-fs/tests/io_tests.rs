use qrc_fs::{Error, NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_read_text_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "hello").unwrap();

    let path = NormalizedPath::new(&file_path);
    let content = io::read_text(&path).unwrap();
    assert_eq!(content, "hello");
}

#[test]
fn test_read_text_nonexistent_file_reports_path() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    let err = io::read_text(&path).unwrap_err();

    match err {
        Error::Io { path, .. } => assert!(path.to_string_lossy().contains("file.txt")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_read_text_rejects_invalid_utf8() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("latin1.cpp");
    fs::write(&file_path, b"caf\xe9 \":/icons/a.png\"").unwrap();

    let path = NormalizedPath::new(&file_path);
    assert!(io::read_text(&path).is_err());
}

#[test]
fn test_read_text_lossy_keeps_ascii_tokens() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("latin1.cpp");
    fs::write(&file_path, b"caf\xe9 \":/icons/a.png\"").unwrap();

    let path = NormalizedPath::new(&file_path);
    let content = io::read_text_lossy(&path).unwrap();
    assert!(content.contains("\":/icons/a.png\""));
    assert!(content.contains('\u{FFFD}'));
}

#[test]
fn test_read_text_lossy_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.ui");
    assert!(io::read_text_lossy(&path).is_err());
}
