//! Validation of the configured library set
//!
//! Runs once, before any comparison. Checks per library, in order:
//!
//! 1. the name is unique across the set (hard failure, stops immediately)
//! 2. no resolved path repeats within the library (hard failure, stops immediately)
//! 3. every path exists as a file or a directory (every missing path is
//!    reported, scanning continues, the run still fails)
//! 4. paths are all files or all directories

use std::collections::{BTreeSet, HashSet};

use crate::library::{Library, LibraryDraft, LibraryKind, LibrarySource};
use crate::{Error, Result, ValidationIssue};

/// Validate drafts and infer each library's kind from the filesystem.
///
/// # Errors
///
/// Returns [`Error::Validation`] with every issue collected so far when any
/// check fails.
pub fn validate(drafts: Vec<LibraryDraft>) -> Result<Vec<Library>> {
    let mut names = HashSet::new();
    let mut issues = Vec::new();
    let mut libraries = Vec::with_capacity(drafts.len());

    for draft in drafts {
        if !names.insert(draft.name.clone()) {
            issues.push(ValidationIssue::DuplicateName { name: draft.name });
            return Err(Error::Validation { issues });
        }

        let mut seen = HashSet::new();
        let mut files = 0usize;
        let mut dirs = 0usize;

        for path in &draft.paths {
            if !seen.insert(path) {
                issues.push(ValidationIssue::DuplicatePath {
                    library: draft.name.clone(),
                    path: path.clone(),
                });
                return Err(Error::Validation { issues });
            }

            if path.is_file() {
                files += 1;
            } else if path.is_dir() {
                dirs += 1;
            } else {
                issues.push(ValidationIssue::MissingPath {
                    library: draft.name.clone(),
                    path: path.clone(),
                });
            }
        }

        if files > 0 && dirs > 0 {
            issues.push(ValidationIssue::MixedKind {
                library: draft.name.clone(),
            });
            continue;
        }

        let kind = if files > 0 {
            LibraryKind::File
        } else {
            LibraryKind::Folder
        };
        tracing::debug!(library = %draft.name, %kind, paths = draft.paths.len(), "library validated");
        libraries.push(into_library(draft, kind));
    }

    if issues.is_empty() {
        Ok(libraries)
    } else {
        Err(Error::Validation { issues })
    }
}

fn into_library(draft: LibraryDraft, kind: LibraryKind) -> Library {
    match kind {
        LibraryKind::File => {
            if draft.whitelist.is_some() || !draft.blacklist.is_empty() {
                tracing::warn!(
                    library = %draft.name,
                    "whiteList/blackList only apply to folder libraries; ignored"
                );
            }
            Library {
                name: draft.name,
                source: LibrarySource::Files { paths: draft.paths },
            }
        }
        LibraryKind::Folder => Library {
            name: draft.name,
            source: LibrarySource::Folder {
                roots: draft.paths,
                whitelist: draft
                    .whitelist
                    .map(|names| names.into_iter().collect::<BTreeSet<_>>()),
                blacklist: draft.blacklist.into_iter().collect(),
            },
        },
    }
}
