// Chunk: docs/chunks/buffer_file_io - Open and save through the buffer
// Chunk: docs/chunks/buffer_registry - Process-wide open document registry

//! File-backed tests for open, save and path reuse in the registry.

use std::fs;

use deskedit_buffer::{BufferError, BufferRegistry, Loc, OpenOutcome, TextBuffer};

#[test]
fn test_open_reads_lines_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "alpha\nbeta\n").unwrap();

    let buf = TextBuffer::open(&path).unwrap();
    assert_eq!(buf.lines_num(), 3);
    assert_eq!(buf.line(1), "beta");
    assert_eq!(buf.path(), Some(path.as_path()));
    assert!(!buf.modified());
}

#[test]
fn test_open_rejects_binary_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let err = TextBuffer::open(&path).unwrap_err();
    assert!(matches!(err, BufferError::InvalidUtf8 { .. }));
    assert!(err.to_string().contains("blob.bin"));
}

#[test]
fn test_save_writes_and_clears_modified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    fs::write(&path, "one").unwrap();

    let mut buf = TextBuffer::open(&path).unwrap();
    buf.insert(buf.end(), "\ntwo");
    assert!(buf.modified());

    buf.save().unwrap();
    assert!(!buf.modified());
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo");
}

#[test]
fn test_save_as_assigns_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.txt");

    let mut buf = TextBuffer::from_str("draft");
    buf.save_as(&path).unwrap();
    assert_eq!(buf.path(), Some(path.as_path()));
    assert_eq!(fs::read_to_string(&path).unwrap(), "draft");
}

#[test]
fn test_save_into_missing_directory_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut buf = TextBuffer::from_str("x");
    buf.set_path(dir.path().join("no/such/dir/file.txt"));

    let err = buf.save().unwrap_err();
    assert!(matches!(err, BufferError::Io { .. }));
}

#[test]
fn test_registry_reuses_open_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.rs");
    fs::write(&path, "fn main() {}").unwrap();

    let mut registry = BufferRegistry::new();
    let first = registry.open(&path).unwrap();
    assert!(matches!(first, OpenOutcome::Loaded(_)));

    // A different spelling of the same file still resolves to the same buffer.
    let dotted = dir.path().join(".").join("shared.rs");
    let second = registry.open(&dotted).unwrap();
    assert_eq!(second, OpenOutcome::Reused(first.id()));
    assert_eq!(registry.len(), 1);

    registry.get_mut(first.id()).unwrap().insert(Loc::ORIGIN, "// ");
    assert_eq!(registry.get(second.id()).unwrap().line(0), "// fn main() {}");
}

#[test]
fn test_registry_find_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "a").unwrap();

    let mut registry = BufferRegistry::new();
    assert!(registry.find_by_path(&path).is_none());
    let id = registry.open(&path).unwrap().id();
    assert_eq!(registry.find_by_path(&path), Some(id));
}
