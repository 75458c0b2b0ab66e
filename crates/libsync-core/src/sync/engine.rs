//! SyncEngine implementation
//!
//! The engine walks validated libraries in order, evaluates every comparison
//! group and, in apply mode, reconciles the divergent ones.

use crate::Result;
use crate::backup::BackupManager;
use crate::enumerate::enumerate;
use crate::fingerprint::collect;
use crate::library::Library;
use crate::reconcile::reconcile;

use super::report::{GroupReport, SyncReport};

/// Whether a run may write to the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Report only; nothing is written
    #[default]
    DryRun,
    /// Back up and overwrite obsolete copies
    Apply,
}

/// Engine for comparing and reconciling library copies
pub struct SyncEngine {
    backups: BackupManager,
}

impl SyncEngine {
    pub fn new(backups: BackupManager) -> Self {
        Self { backups }
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Enumerate, fingerprint and evaluate every group of one library.
    ///
    /// Never writes to the filesystem.
    ///
    /// # Errors
    ///
    /// Any enumeration or fingerprinting failure, e.g. a missing file in a
    /// file library or a missing folder root.
    pub fn check_library(&self, library: &Library) -> Result<Vec<GroupReport>> {
        enumerate(library)?
            .into_iter()
            .map(|group| {
                let candidates = collect(&library.name, &group.paths, group.require_all)?;
                Ok(GroupReport::new(&library.name, group.name, candidates))
            })
            .collect()
    }

    /// Process every library in order.
    ///
    /// A library that fails is recorded in [`SyncReport::failures`] and the
    /// run moves on to the next one.
    pub fn run(&self, libraries: &[Library], mode: SyncMode) -> SyncReport {
        let mut report = SyncReport::new(mode);

        for library in libraries {
            let groups = match self.check_library(library) {
                Ok(groups) => groups,
                Err(e) => {
                    tracing::warn!(library = %library.name, error = %e, "library skipped");
                    report.push_failure(&library.name, e);
                    continue;
                }
            };

            for group in groups {
                let index = report.push_group(group);
                let group = &mut report.groups[index];
                let Some(divergence) = group.verdict.divergence() else {
                    tracing::debug!(group = %group.name, "consistent");
                    continue;
                };
                tracing::info!(
                    group = %group.name,
                    obsolete = divergence.obsolete.len(),
                    "divergent"
                );

                if mode == SyncMode::Apply {
                    group.outcomes = reconcile(&group.candidates, divergence, &self.backups);
                }
            }
        }

        tracing::info!(
            mode = ?mode,
            groups = report.groups.len(),
            divergent = report.divergent().count(),
            failures = report.failures.len(),
            "run finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Variables;
    use libsync_fs::NormalizedPath;
    use std::fs;
    use std::path::Path;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn write_at(path: &Path, content: &str, secs: u64) -> NormalizedPath {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
        NormalizedPath::new(path)
    }

    fn engine(dir: &TempDir) -> SyncEngine {
        SyncEngine::new(BackupManager::with_run_name(
            NormalizedPath::new(dir.path().join("backups")),
            Variables::new(),
            "run",
        ))
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let p1 = write_at(&dir.path().join("a/conf"), "old", 5);
        let p2 = write_at(&dir.path().join("b/conf"), "new", 10);
        let lib = Library::files("conf", vec![p1.clone(), p2]);

        let report = engine(&dir).run(&[lib], SyncMode::DryRun);
        assert_eq!(report.divergent().count(), 1);
        assert!(report.outcomes().next().is_none());
        assert_eq!(fs::read_to_string(p1.to_native()).unwrap(), "old");
        assert!(!dir.path().join("backups").exists());
    }

    #[test]
    fn apply_then_dry_run_is_consistent() {
        let dir = TempDir::new().unwrap();
        let p1 = write_at(&dir.path().join("a/conf"), "old", 5);
        let p2 = write_at(&dir.path().join("b/conf"), "new", 10);
        let p3 = write_at(&dir.path().join("c/conf"), "older", 1);
        let libs = [Library::files("conf", vec![p1, p2, p3])];
        let engine = engine(&dir);

        let applied = engine.run(&libs, SyncMode::Apply);
        assert_eq!(applied.updated_count(), 2);
        assert!(applied.is_success(true));

        let again = engine.run(&libs, SyncMode::DryRun);
        assert!(!again.has_divergence());
        assert!(again.groups.iter().all(|g| g.verdict.is_consistent()));
    }

    #[test]
    fn failing_library_does_not_stop_the_run() {
        let dir = TempDir::new().unwrap();
        let present = write_at(&dir.path().join("a/conf"), "x", 1);
        let missing = NormalizedPath::new(dir.path().join("b/conf"));
        let root1 = dir.path().join("r1");
        let root2 = dir.path().join("r2");
        write_at(&root1.join("x.proto"), "one", 1);
        write_at(&root2.join("x.proto"), "two", 2);

        let libs = [
            Library::files("conf", vec![present, missing]),
            Library::folder(
                "proto",
                vec![NormalizedPath::new(&root1), NormalizedPath::new(&root2)],
            ),
        ];
        let report = engine(&dir).run(&libs, SyncMode::DryRun);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].library, "conf");
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].name, "proto/x.proto");
        assert_eq!(report.groups[0].tag, Some(1));
        assert!(!report.is_success(false));
    }

    #[test]
    fn check_library_reports_every_folder_file() {
        let dir = TempDir::new().unwrap();
        let r1 = dir.path().join("r1");
        let r2 = dir.path().join("r2");
        write_at(&r1.join("a.txt"), "A", 1);
        write_at(&r1.join("b.txt"), "B1", 1);
        write_at(&r2.join("b.txt"), "B2", 2);
        write_at(&r2.join("c.txt"), "C", 1);

        let lib = Library::folder("lib", vec![NormalizedPath::new(&r1), NormalizedPath::new(&r2)]);
        let groups = engine(&dir).check_library(&lib).unwrap();

        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["lib/a.txt", "lib/b.txt", "lib/c.txt"]);
        assert!(groups[0].verdict.is_consistent());
        assert!(!groups[1].verdict.is_consistent());
        assert!(groups[2].verdict.is_consistent());
    }
}
