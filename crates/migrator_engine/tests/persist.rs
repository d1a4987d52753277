use std::fs;
use std::path::Path;

use migrator_engine::{ensure_output_dir, reset_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn reset_creates_missing_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("img");
    assert_eq!(reset_dir(&dir).unwrap(), 0);
    assert!(dir.is_dir());
}

#[test]
fn reset_removes_every_entry() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("img");
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("stale.jpg"), b"old").unwrap();
    fs::write(dir.join("nested").join("deep.png"), b"old").unwrap();

    assert_eq!(reset_dir(&dir).unwrap(), 2);
    assert!(dir.is_dir());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn reset_refuses_a_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("img");
    fs::write(&file, "x").unwrap();
    assert!(reset_dir(&file).is_err());
    assert!(file.is_file());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write(Path::new("doc.md"), b"hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "doc.md");
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write(Path::new("doc.md"), b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn atomic_write_creates_parents() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("posts"));
    let path = writer
        .write(&Path::new("2024").join("05").join("post.md"), b"body")
        .unwrap();
    assert_eq!(path, temp.path().join("posts").join("2024").join("05").join("post.md"));
    assert_eq!(fs::read(&path).unwrap(), b"body");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write(Path::new("doc.md"), b"data").is_err());
    assert!(!file_path.with_file_name("doc.md").exists());
}
