use libsync_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("nested/dir/test.txt"));

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("test.txt"));

    io::write_atomic(&path, b"content").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    let err = io::read_text(&path).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_copy_file_replaces_destination_bytes() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.bin");
    let dst = temp.path().join("dst.bin");
    fs::write(&src, [1u8, 2, 3, 4]).unwrap();
    fs::write(&dst, "old content that is longer").unwrap();

    let copied = io::copy_file(&NormalizedPath::new(&src), &NormalizedPath::new(&dst)).unwrap();

    assert_eq!(copied, 4);
    assert_eq!(fs::read(&dst).unwrap(), vec![1u8, 2, 3, 4]);
}

#[test]
fn test_copy_file_creates_destination_directory() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.txt");
    fs::write(&src, "x").unwrap();
    let dst = NormalizedPath::new(temp.path().join("a/b/c.txt"));

    io::copy_file(&NormalizedPath::new(&src), &dst).unwrap();

    assert!(dst.is_file());
}

#[test]
fn test_copy_file_missing_source_is_not_found() {
    let temp = TempDir::new().unwrap();
    let src = NormalizedPath::new(temp.path().join("vanished.txt"));
    let dst = NormalizedPath::new(temp.path().join("dst.txt"));
    fs::write(dst.to_native(), "keep me").unwrap();

    let err = io::copy_file(&src, &dst).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(fs::read_to_string(dst.to_native()).unwrap(), "keep me");
}

#[test]
fn test_read_bytes_keeps_invalid_utf8() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("latin1.txt"));
    fs::write(path.to_native(), b"caf\xe9").unwrap();

    assert_eq!(io::read_bytes(&path).unwrap(), b"caf\xe9");
    assert!(io::read_text(&path).is_err());
}
