//! Filesystem layer for libsync
//!
//! Provides normalized path handling, content checksums, atomic writes and
//! format-agnostic loading of the configuration documents.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{compute_content_checksum, compute_file_checksum};
pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use path::NormalizedPath;
