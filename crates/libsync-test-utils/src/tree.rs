//! [`TestTree`] builder for libsync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use libsync_fs::NormalizedPath;
use tempfile::TempDir;

/// A temporary directory with helpers to lay out library copies and assert
/// on the result.
///
/// # Example
///
/// ```rust,no_run
/// use libsync_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write_at("a/conf.ini", "old", 100);
/// tree.write_at("b/conf.ini", "new", 200);
/// tree.assert_file_contains("b/conf.ini", "new");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root as a [`NormalizedPath`], usable as a base directory.
    pub fn base(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Absolute native path of `rel`.
    pub fn native(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Absolute normalized path of `rel`.
    pub fn path(&self, rel: &str) -> NormalizedPath {
        NormalizedPath::new(self.native(rel))
    }

    /// Create a directory (and its parents).
    pub fn mkdir(&self, rel: &str) -> NormalizedPath {
        fs::create_dir_all(self.native(rel)).unwrap();
        self.path(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> NormalizedPath {
        let full = self.native(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        self.path(rel)
    }

    /// Write `content` to `rel` and set its modification time to `secs`
    /// seconds after the epoch.
    pub fn write_at(&self, rel: &str, content: &str, secs: u64) -> NormalizedPath {
        let path = self.write(rel, content);
        self.touch(rel, secs);
        path
    }

    /// Set the modification time of an existing file.
    pub fn touch(&self, rel: &str, secs: u64) {
        fs::File::options()
            .write(true)
            .open(self.native(rel))
            .unwrap_or_else(|e| panic!("Could not open {}: {}", rel, e))
            .set_modified(Self::at(secs))
            .unwrap();
    }

    /// Write `content` to `rel` and pin its modification time to its birth
    /// time, so the copy looks freshly created.
    ///
    /// Returns `None` when the filesystem does not record a birth time.
    pub fn write_fresh(&self, rel: &str, content: &str) -> Option<NormalizedPath> {
        let path = self.write(rel, content);
        let file = fs::File::options().write(true).open(self.native(rel)).unwrap();
        let born = file.metadata().unwrap().created().ok()?;
        file.set_modified(born).unwrap();
        Some(path)
    }

    /// `secs` seconds after the epoch.
    pub fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    pub fn read(&self, rel: &str) -> String {
        let full = self.native(rel);
        fs::read_to_string(&full)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full.display()))
    }

    pub fn modified(&self, rel: &str) -> SystemTime {
        fs::metadata(self.native(rel)).unwrap().modified().unwrap()
    }

    /// Every regular file under `rel`, relative to it, sorted.
    pub fn files_under(&self, rel: &str) -> Vec<String> {
        fn walk(dir: &Path, prefix: &str, out: &mut Vec<String>) {
            let Ok(entries) = fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().into_owned();
                let rel = if prefix.is_empty() {
                    name
                } else {
                    format!("{}/{}", prefix, name)
                };
                if entry.path().is_dir() {
                    walk(&entry.path(), &rel, out);
                } else {
                    out.push(rel);
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.native(rel), "", &mut out);
        out.sort();
        out
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full = self.native(rel);
        assert!(full.exists(), "Expected file to exist: {}", full.display());
    }

    /// Assert that `rel` does **not** exist.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full = self.native(rel);
        assert!(
            !full.exists(),
            "Expected file NOT to exist: {}",
            full.display()
        );
    }

    /// Assert that the file at `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read(rel);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            rel,
            content,
            file_content
        );
    }

    /// Assert that the file at `rel` holds exactly `content`.
    pub fn assert_file_eq(&self, rel: &str, content: &str) {
        assert_eq!(self.read(rel), content, "unexpected content in {}", rel);
    }
}
