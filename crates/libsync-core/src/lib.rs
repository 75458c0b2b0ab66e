//! Divergence detection and reconciliation engine for libsync
//!
//! A *library* is a named set of filesystem locations that should hold the
//! same content. This crate implements the pipeline that runs over a
//! configured set of libraries:
//!
//! ```text
//!   SyncConfig ──> validate ──> enumerate ──> fingerprint ──> evaluate ──> reconcile
//!   (resolve)      (Library)    (groups)      (candidates)    (Verdict)    (Apply only)
//! ```
//!
//! Everything up to and including [`evaluate`] is free of side effects in
//! every [`SyncMode`]. Only [`reconcile`] writes, and [`SyncEngine`] only
//! calls it in [`SyncMode::Apply`].
//!
//! # Example
//!
//! ```no_run
//! use libsync_core::{BackupManager, SyncConfig, SyncEngine, SyncMode, validate};
//! use libsync_fs::NormalizedPath;
//!
//! fn example() -> libsync_core::Result<()> {
//!     let base = NormalizedPath::new("/opt/libsync");
//!     let config = SyncConfig::load(&base.join("dict.toml"), &base.join("sync.json"))?;
//!     let libraries = validate(config.drafts(&base))?;
//!
//!     let backups = BackupManager::new(base.join("backups"), config.variables.clone());
//!     let report = SyncEngine::new(backups).run(&libraries, SyncMode::DryRun);
//!     println!("divergent groups: {}", report.divergent().count());
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod evaluate;
pub mod fingerprint;
pub mod library;
pub mod reconcile;
pub mod resolve;
pub mod sync;
pub mod validate;

pub use backup::BackupManager;
pub use config::{LibraryRecord, SyncConfig};
pub use enumerate::{CandidateGroup, enumerate};
pub use error::{Error, Result, ValidationIssue};
pub use evaluate::{Divergence, ObsoleteCopy, Verdict, evaluate};
pub use fingerprint::{FileCandidate, collect};
pub use library::{Library, LibraryDraft, LibraryKind, LibrarySource};
pub use reconcile::{ReconciliationOutcome, reconcile};
pub use resolve::{Placeholders, Variables, expand, expand_value};
pub use sync::{
    DiffSelector, DiffTarget, GroupReport, LibraryFailure, SyncEngine, SyncMode, SyncReport,
};
pub use validate::validate;
