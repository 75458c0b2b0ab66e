//! SyncEngine for comparing and reconciling library copies
//!
//! This module provides:
//! - **engine**: runs enumerate -> fingerprint -> evaluate (-> reconcile) over a library set
//! - **report**: the per-run accumulator of group verdicts, outcomes and failures,
//!   including `N.M` tag addressing used by the diff view

mod engine;
mod report;

pub use engine::{SyncEngine, SyncMode};
pub use report::{DiffSelector, DiffTarget, GroupReport, LibraryFailure, SyncReport};
