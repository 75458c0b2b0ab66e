//! Library model
//!
//! A [`LibraryDraft`] is what the configuration produces: resolved paths that
//! have not been checked against the filesystem yet. [`validate`] turns
//! drafts into [`Library`] values whose kind has been inferred from disk.
//!
//! [`validate`]: crate::validate

use std::collections::BTreeSet;

use libsync_fs::NormalizedPath;

/// A library as read from configuration, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDraft {
    pub name: String,
    /// Enabled paths, variables expanded and anchored
    pub paths: Vec<NormalizedPath>,
    pub whitelist: Option<Vec<String>>,
    pub blacklist: Vec<String>,
}

impl LibraryDraft {
    pub fn new(name: impl Into<String>, paths: Vec<NormalizedPath>) -> Self {
        Self {
            name: name.into(),
            paths,
            whitelist: None,
            blacklist: Vec::new(),
        }
    }
}

/// Whether a library compares single files or folders of files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    File,
    Folder,
}

impl std::fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

/// Where the copies of a library live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    /// Every path is one copy of the same file
    Files { paths: Vec<NormalizedPath> },
    /// Every root holds copies of the same set of files
    Folder {
        roots: Vec<NormalizedPath>,
        /// When present, only these filenames are compared
        whitelist: Option<BTreeSet<String>>,
        /// Filenames never compared
        blacklist: BTreeSet<String>,
    },
}

/// A validated synchronization unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub name: String,
    pub source: LibrarySource,
}

impl Library {
    pub fn files(name: impl Into<String>, paths: Vec<NormalizedPath>) -> Self {
        Self {
            name: name.into(),
            source: LibrarySource::Files { paths },
        }
    }

    pub fn folder(name: impl Into<String>, roots: Vec<NormalizedPath>) -> Self {
        Self {
            name: name.into(),
            source: LibrarySource::Folder {
                roots,
                whitelist: None,
                blacklist: BTreeSet::new(),
            },
        }
    }

    /// Restrict a folder library to the given filenames. No-op for file libraries.
    pub fn with_whitelist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let LibrarySource::Folder { whitelist, .. } = &mut self.source {
            *whitelist = Some(names.into_iter().map(Into::into).collect());
        }
        self
    }

    /// Exclude the given filenames from a folder library. No-op for file libraries.
    pub fn with_blacklist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let LibrarySource::Folder { blacklist, .. } = &mut self.source {
            *blacklist = names.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn kind(&self) -> LibraryKind {
        match self.source {
            LibrarySource::Files { .. } => LibraryKind::File,
            LibrarySource::Folder { .. } => LibraryKind::Folder,
        }
    }

    /// The configured paths (files or folder roots)
    pub fn paths(&self) -> &[NormalizedPath] {
        match &self.source {
            LibrarySource::Files { paths } => paths,
            LibrarySource::Folder { roots, .. } => roots,
        }
    }
}
