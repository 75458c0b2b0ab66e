//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use libsync_core::SyncMode;

use crate::commands::SyncArgs;

/// libsync - keep copies of library files in sync across locations
///
/// Without flags, reports which copies are out of date. The most recently
/// modified copy of each file is taken as the latest version.
#[derive(Parser, Debug)]
#[command(name = "libsync")]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Update obsolete copies to the latest version (backups are kept)
    #[arg(short, long)]
    pub update: bool,

    /// List every synchronized file, including up-to-date ones
    #[arg(short, long)]
    pub info: bool,

    /// Show what changed between a latest file and an obsolete copy,
    /// selected by the tag printed in the report
    #[arg(short, long, value_name = "LATEST.OBSOLETE", conflicts_with = "update")]
    pub diff: Option<String>,

    /// Create example configuration files
    #[arg(short, long, conflicts_with_all = ["update", "diff", "info"])]
    pub example: bool,

    /// Print the version and repository location
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit with an error when any update fails
    #[arg(long)]
    pub strict: bool,

    /// Library-set document
    #[arg(long, env = "LIBSYNC_SYNC_FILE", default_value = "sync.json")]
    pub sync_file: PathBuf,

    /// Variable dictionary (TOML, JSON or YAML)
    #[arg(long, env = "LIBSYNC_DICT_FILE", default_value = "dict.toml")]
    pub dict_file: PathBuf,

    /// Directory that receives per-run backups
    #[arg(long, env = "LIBSYNC_BACKUP_DIR", default_value = "backups")]
    pub backup_dir: PathBuf,

    /// Directory that relative paths are resolved against [default: current directory]
    #[arg(long, env = "LIBSYNC_BASE_DIR")]
    pub base_dir: Option<PathBuf>,
}

impl Cli {
    pub fn sync_args(&self) -> SyncArgs {
        SyncArgs {
            mode: if self.update {
                SyncMode::Apply
            } else {
                SyncMode::DryRun
            },
            info: self.info,
            strict: self.strict,
            diff: self.diff.clone(),
        }
    }
}
