//! Error types for libsync-core

use libsync_fs::NormalizedPath;

/// Result type for libsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single problem found while validating the configured library set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// Two libraries share a name
    #[error("Synchronized library name {name} is duplicated")]
    DuplicateName { name: String },

    /// The same resolved path is listed twice in one library
    #[error("Path {path} in library {library} appears multiple times")]
    DuplicatePath {
        library: String,
        path: NormalizedPath,
    },

    /// An enabled path is neither a file nor a directory
    #[error("Path {path} in library {library} doesn't exist")]
    MissingPath {
        library: String,
        path: NormalizedPath,
    },

    /// A library lists both file and folder paths
    #[error("Library {library} contains files and folders paths")]
    MixedKind { library: String },
}

impl ValidationIssue {
    /// Name of the library the issue belongs to
    pub fn library(&self) -> &str {
        match self {
            Self::DuplicateName { name } => name,
            Self::DuplicatePath { library, .. }
            | Self::MissingPath { library, .. }
            | Self::MixedKind { library } => library,
        }
    }
}

/// Errors that can occur in libsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The library set failed validation; nothing was compared
    #[error("Library set is invalid ({} issue(s)): {}", .issues.len(), join_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },

    /// A required file of a file-kind library is missing
    #[error("Missing {library} file: {path}")]
    MissingFile {
        library: String,
        path: NormalizedPath,
    },

    /// A folder root of a folder-kind library does not exist
    #[error("Folder {path} in library {library} doesn't exist")]
    FolderNotFound {
        library: String,
        path: NormalizedPath,
    },

    /// A folder root of a folder-kind library is not a directory
    #[error("{path} in library {library} isn't a directory")]
    NotADirectory {
        library: String,
        path: NormalizedPath,
    },

    /// Backing up or overwriting an obsolete copy failed
    #[error("File {path} update failed: {reason}")]
    UpdateFailed {
        path: NormalizedPath,
        reason: String,
    },

    /// A `N.M` diff selector is malformed or does not match the report
    #[error("Invalid {selector} tag selected for comparing files: {reason}")]
    InvalidDiffSelector { selector: String, reason: String },

    /// A configuration document is missing or cannot be parsed
    #[error("Missing file or invalid config file {path}: {reason}")]
    ConfigMissingOrInvalid {
        path: NormalizedPath,
        reason: String,
    },

    /// Filesystem error from libsync-fs
    #[error(transparent)]
    Fs(#[from] libsync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON conversion error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
