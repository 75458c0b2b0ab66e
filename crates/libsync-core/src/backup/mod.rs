//! Backups of files about to be overwritten
//!
//! Every run gets its own directory under the backup root, named after the
//! local time the run started (second resolution):
//!
//! ```text
//! backups/
//!   2025-03-14_09-26-53/
//!     {work}/PLC/serial.c        <- /home/me/work/PLC/serial.c, `work` = /home/me/work
//!     srv/legacy/serial.c        <- /srv/legacy/serial.c, no matching variable
//! ```
//!
//! The backup name mirrors the original path, so two copies backed up in the
//! same run never collide. A name that is already taken (two runs within
//! the same second) gets a `~N` suffix instead of being overwritten.

mod run_backup;

pub use run_backup::{BackupManager, RUN_DIR_FORMAT};
