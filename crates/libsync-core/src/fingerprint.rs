//! Per-file fingerprints: content checksum plus two timestamps

use std::fs::Metadata;
use std::time::SystemTime;

use libsync_fs::{NormalizedPath, compute_file_checksum};

use crate::{Error, Result};

/// One copy of a library file, fingerprinted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: NormalizedPath,
    /// `sha256:<hex>` of the full content
    pub checksum: String,
    pub modified: SystemTime,
    pub created: SystemTime,
}

impl FileCandidate {
    /// Fingerprint a single existing file.
    pub fn fingerprint(path: &NormalizedPath) -> Result<Self> {
        let native = path.to_native();
        let metadata =
            std::fs::metadata(&native).map_err(|e| libsync_fs::Error::io(&native, e))?;
        let modified = metadata
            .modified()
            .map_err(|e| libsync_fs::Error::io(&native, e))?;
        let created = created_time(&metadata, modified);
        let checksum = compute_file_checksum(&native)?;

        Ok(Self {
            path: path.clone(),
            checksum,
            modified,
            created,
        })
    }
}

/// Fingerprint every path of a group.
///
/// With `require_all`, the first missing path fails the whole collection
/// and nothing is hashed. Otherwise missing paths are dropped.
pub fn collect(
    library: &str,
    paths: &[NormalizedPath],
    require_all: bool,
) -> Result<Vec<FileCandidate>> {
    if require_all && let Some(missing) = paths.iter().find(|p| !p.is_file()) {
        return Err(Error::MissingFile {
            library: library.to_string(),
            path: missing.clone(),
        });
    }

    paths
        .iter()
        .filter(|p| p.is_file())
        .map(|path| {
            let candidate = FileCandidate::fingerprint(path)?;
            tracing::debug!(path = %candidate.path, checksum = %candidate.checksum, "fingerprinted");
            Ok(candidate)
        })
        .collect()
}

/// Birth time where the platform records one; on unix the inode change
/// time otherwise; the modification time as a last resort.
fn created_time(metadata: &Metadata, modified: SystemTime) -> SystemTime {
    if let Ok(created) = metadata.created() {
        return created;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        use std::time::{Duration, UNIX_EPOCH};

        if metadata.ctime() >= 0 {
            let ctime = Duration::new(metadata.ctime() as u64, metadata.ctime_nsec() as u32);
            if let Some(changed) = UNIX_EPOCH.checked_add(ctime) {
                return changed;
            }
        }
    }
    modified
}
