//! Candidate enumeration
//!
//! Turns a library into comparison groups. A file library is a single group
//! whose members must all exist. A folder library yields one group per
//! filename found under its roots; a filename need not exist under every
//! root, so those groups tolerate missing members.

use std::collections::BTreeSet;
use std::fs;

use libsync_fs::NormalizedPath;

use crate::library::{Library, LibrarySource};
use crate::{Error, Result};

/// The paths that are compared against each other
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGroup {
    /// Library name, or `library/filename` for folder libraries
    pub name: String,
    pub paths: Vec<NormalizedPath>,
    /// Whether every path must exist when fingerprinting
    pub require_all: bool,
}

/// Produce the comparison groups of a library.
///
/// Folder groups come out in sorted filename order.
///
/// # Errors
///
/// [`Error::FolderNotFound`] / [`Error::NotADirectory`] for a bad folder root.
pub fn enumerate(library: &Library) -> Result<Vec<CandidateGroup>> {
    match &library.source {
        LibrarySource::Files { paths } => Ok(vec![CandidateGroup {
            name: library.name.clone(),
            paths: paths.clone(),
            require_all: true,
        }]),
        LibrarySource::Folder {
            roots,
            whitelist,
            blacklist,
        } => {
            let listings = roots
                .iter()
                .map(|root| list_files(&library.name, root))
                .collect::<Result<Vec<_>>>()?;

            let names = select_names(&listings, whitelist.as_ref(), blacklist);
            tracing::debug!(library = %library.name, files = names.len(), "folder enumerated");

            Ok(names
                .into_iter()
                .map(|filename| CandidateGroup {
                    name: format!("{}/{}", library.name, filename),
                    paths: roots.iter().map(|root| root.join(&filename)).collect(),
                    require_all: false,
                })
                .collect())
        }
    }
}

/// Names of the regular files directly under `root` (non-recursive).
pub fn list_files(library: &str, root: &NormalizedPath) -> Result<BTreeSet<String>> {
    if !root.exists() {
        return Err(Error::FolderNotFound {
            library: library.to_string(),
            path: root.clone(),
        });
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            library: library.to_string(),
            path: root.clone(),
        });
    }

    let mut names = BTreeSet::new();
    let entries =
        fs::read_dir(root.to_native()).map_err(|e| libsync_fs::Error::io(root.to_native(), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| libsync_fs::Error::io(root.to_native(), e))?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                names.insert(name);
            }
            Err(raw) => {
                tracing::warn!(root = %root, name = ?raw, "skipping non UTF-8 filename");
            }
        }
    }
    Ok(names)
}

/// Union of all listings, narrowed by the whitelist, minus the blacklist.
pub fn select_names(
    listings: &[BTreeSet<String>],
    whitelist: Option<&BTreeSet<String>>,
    blacklist: &BTreeSet<String>,
) -> BTreeSet<String> {
    listings
        .iter()
        .flatten()
        .filter(|name| whitelist.is_none_or(|allowed| allowed.contains(*name)))
        .filter(|name| !blacklist.contains(*name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn union_of_roots() {
        let listings = [set(&["a.txt", "b.txt"]), set(&["b.txt", "c.txt"])];
        assert_eq!(
            select_names(&listings, None, &BTreeSet::new()),
            set(&["a.txt", "b.txt", "c.txt"])
        );
    }

    #[test]
    fn blacklist_removes() {
        let listings = [set(&["a.txt", "b.txt"]), set(&["b.txt", "c.txt"])];
        assert_eq!(
            select_names(&listings, None, &set(&["c.txt"])),
            set(&["a.txt", "b.txt"])
        );
    }

    #[test]
    fn whitelist_intersects() {
        let listings = [set(&["a.txt", "b.txt"]), set(&["b.txt", "c.txt"])];
        assert_eq!(
            select_names(&listings, Some(&set(&["b.txt", "zzz.txt"])), &BTreeSet::new()),
            set(&["b.txt"])
        );
    }

    #[test]
    fn blacklist_wins_over_whitelist() {
        let listings = [set(&["a.txt"])];
        assert!(select_names(&listings, Some(&set(&["a.txt"])), &set(&["a.txt"])).is_empty());
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let root = NormalizedPath::new(dir.path().join("gone"));
        let lib = Library::folder("proto", vec![root.clone()]);

        match enumerate(&lib) {
            Err(Error::FolderNotFound { library, path }) => {
                assert_eq!(library, "proto");
                assert_eq!(path, root);
            }
            other => panic!("expected FolderNotFound, got {:?}", other),
        }
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = list_files("proto", &NormalizedPath::new(&file)).unwrap_err();
        assert!(matches!(err, Error::NotADirectory { .. }));
    }

    #[test]
    fn listing_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/b.txt"), "b").unwrap();

        let names = list_files("lib", &NormalizedPath::new(dir.path())).unwrap();
        assert_eq!(names, set(&["a.txt"]));
    }

    #[test]
    fn file_library_is_one_strict_group() {
        let lib = Library::files(
            "conf",
            vec![NormalizedPath::new("/a/conf"), NormalizedPath::new("/b/conf")],
        );
        let groups = enumerate(&lib).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "conf");
        assert!(groups[0].require_all);
    }
}
