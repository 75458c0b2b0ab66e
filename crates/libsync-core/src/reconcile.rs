//! Reconciliation: back up, then overwrite, every obsolete copy
//!
//! Both steps are ordinary copies. A crash between them leaves the target
//! with its original content and an extra backup. Failures are collected per
//! file and never stop the remaining copies from being processed.

use libsync_fs::{NormalizedPath, io};

use crate::Error;
use crate::backup::BackupManager;
use crate::evaluate::Divergence;
use crate::fingerprint::FileCandidate;

/// Result of reconciling one obsolete copy
#[derive(Debug)]
pub struct ReconciliationOutcome {
    pub path: NormalizedPath,
    /// Where the previous content was saved, if the backup succeeded
    pub backup: Option<NormalizedPath>,
    /// [`Error::UpdateFailed`] when the copy was not updated
    pub error: Option<Error>,
}

impl ReconciliationOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Overwrite every obsolete copy of `divergence` with the authoritative one.
///
/// Copies are processed in the order the evaluator listed them. A copy whose
/// backup fails is left untouched.
pub fn reconcile(
    candidates: &[FileCandidate],
    divergence: &Divergence,
    backups: &BackupManager,
) -> Vec<ReconciliationOutcome> {
    let source = &candidates[divergence.authoritative].path;

    divergence
        .obsolete
        .iter()
        .map(|obsolete| {
            let target = &candidates[obsolete.index].path;
            let outcome = update_one(source, target, backups);
            match &outcome.error {
                None => tracing::info!(source = %source, target = %target, "updated"),
                Some(e) => tracing::warn!(target = %target, error = %e, "update failed"),
            }
            outcome
        })
        .collect()
}

fn update_one(
    source: &NormalizedPath,
    target: &NormalizedPath,
    backups: &BackupManager,
) -> ReconciliationOutcome {
    let backup = match backups.backup_file(target) {
        Ok(backup) => backup,
        Err(e) => {
            return ReconciliationOutcome {
                path: target.clone(),
                backup: None,
                error: Some(update_failed(target, format!("backup failed: {}", e))),
            };
        }
    };

    let error = io::copy_file(source, target)
        .err()
        .map(|e| update_failed(target, e.to_string()));

    ReconciliationOutcome {
        path: target.clone(),
        backup: Some(backup),
        error,
    }
}

fn update_failed(path: &NormalizedPath, reason: String) -> Error {
    Error::UpdateFailed {
        path: path.clone(),
        reason,
    }
}
