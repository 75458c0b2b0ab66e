//! Workspace resolution
//!
//! Turns the path options of the command line into absolute locations. The
//! base directory anchors every relative path: the two configuration files,
//! the backup directory and the relative library paths inside `sync.json`.

use libsync_fs::NormalizedPath;

use crate::cli::Cli;
use crate::error::Result;

/// Absolute locations used by one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub base: NormalizedPath,
    pub dict: NormalizedPath,
    pub sync: NormalizedPath,
    pub backups: NormalizedPath,
}

impl Workspace {
    /// Resolve against the current directory.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let cwd = NormalizedPath::new(std::env::current_dir()?);
        Ok(Self::resolve_in(cli, &cwd))
    }

    pub fn resolve_in(cli: &Cli, cwd: &NormalizedPath) -> Self {
        let base = match &cli.base_dir {
            Some(dir) => NormalizedPath::anchored(dir, cwd),
            None => cwd.clone(),
        };

        Self {
            dict: NormalizedPath::anchored(&cli.dict_file, &base),
            sync: NormalizedPath::anchored(&cli.sync_file, &base),
            backups: NormalizedPath::anchored(&cli.backup_dir, &base),
            base,
        }
    }
}
