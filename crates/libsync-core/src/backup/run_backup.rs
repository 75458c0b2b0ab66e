//! Run-scoped backup manager

use chrono::Local;
use libsync_fs::{NormalizedPath, io};

use crate::Result;
use crate::resolve::{Placeholders, Variables};

/// `strftime` format of the per-run directory name
pub const RUN_DIR_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Copies files into the run directory before they are overwritten
#[derive(Debug, Clone)]
pub struct BackupManager {
    /// Root of all backups
    root: NormalizedPath,
    /// Directory of this run (`root/<timestamp>`)
    run_dir: NormalizedPath,
    /// Used to give backups a location-independent name
    variables: Variables,
    placeholders: Placeholders,
}

impl BackupManager {
    /// Create a manager whose run directory is named after the current time.
    ///
    /// Nothing is written until the first backup.
    pub fn new(root: NormalizedPath, variables: Variables) -> Self {
        let run_name = Local::now().format(RUN_DIR_FORMAT).to_string();
        Self::with_run_name(root, variables, &run_name)
    }

    /// Create a manager with an explicit run directory name.
    pub fn with_run_name(root: NormalizedPath, variables: Variables, run_name: &str) -> Self {
        let run_dir = root.join(run_name);
        Self {
            root,
            run_dir,
            variables,
            placeholders: Placeholders::default(),
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn run_dir(&self) -> &NormalizedPath {
        &self.run_dir
    }

    /// Backup location of `path`, relative to the run directory.
    ///
    /// A path under a variable's base path is named `{var}/rest`; any other
    /// path mirrors its absolute components (root and drive colon dropped).
    /// The name never contains `..`, so it always stays inside the run
    /// directory.
    pub fn relative_name(&self, path: &NormalizedPath) -> String {
        match self.variables.reverse_lookup(path) {
            Some((key, rest)) => contained(self.placeholders.wrap(key), rest),
            None => contained(String::new(), &path.as_str().replace(':', "")),
        }
    }

    /// Copy the current content of `path` into the run directory.
    ///
    /// Returns where the backup was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the backup cannot be
    /// written; the source is never modified.
    pub fn backup_file(&self, path: &NormalizedPath) -> Result<NormalizedPath> {
        let base = self.run_dir.join(&self.relative_name(path));

        let mut target = base.clone();
        let mut attempt = 1;
        while target.exists() {
            target = NormalizedPath::new(format!("{}~{}", base, attempt));
            attempt += 1;
        }

        io::copy_file(path, &target)?;
        tracing::info!(source = %path, backup = %target, "backed up");
        Ok(target)
    }

    /// Every backup file written under the run directory so far.
    pub fn list_run(&self) -> Result<Vec<NormalizedPath>> {
        let mut found = Vec::new();
        if self.run_dir.is_dir() {
            walk(&self.run_dir, &mut found)?;
        }
        found.sort();
        Ok(found)
    }
}

fn contained(mut name: String, rest: &str) -> String {
    for segment in rest.split('/').filter(|s| !matches!(*s, "" | "." | "..")) {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(segment);
    }
    name
}

fn walk(dir: &NormalizedPath, found: &mut Vec<NormalizedPath>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir.to_native()).map_err(|e| libsync_fs::Error::io(dir.to_native(), e))?;
    for entry in entries {
        let entry = entry?;
        let path = NormalizedPath::new(entry.path());
        if path.is_dir() {
            walk(&path, found)?;
        } else {
            found.push(path);
        }
    }
    Ok(())
}
