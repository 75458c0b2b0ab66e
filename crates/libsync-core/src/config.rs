//! Loading of the variable dictionary and the library-set document
//!
//! The library-set document is either a top-level array of library records
//! or a table with a `libraries` array (for TOML, which has no top-level
//! arrays):
//!
//! ```json
//! [
//!   { "name": "serial_port.c", "paths": ["{staff}/serial.c", "{work}/PLC/{name}"] },
//!   { "name": "protobuf", "paths": ["{web}/proto/", "#{staff}/{name}/"], "blackList": ["tmp.proto"] }
//! ]
//! ```
//!
//! A path starting with `#` is kept in the file but disabled.

use libsync_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::library::LibraryDraft;
use crate::resolve::{Placeholders, Variables, expand, expand_value};
use crate::{Error, Result};

/// Marks a path as present but disabled
pub const DISABLED_PREFIX: char = '#';

/// Placeholder key replaced by the library's own name
pub const NAME_VARIABLE: &str = "name";

/// One library as written in the library-set document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRecord {
    pub name: String,
    pub paths: Vec<String>,
    #[serde(rename = "whiteList", default, skip_serializing_if = "Option::is_none")]
    pub white_list: Option<Vec<String>>,
    #[serde(rename = "blackList", default, skip_serializing_if = "Option::is_none")]
    pub black_list: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LibraryDocument {
    List(Vec<LibraryRecord>),
    Table { libraries: Vec<LibraryRecord> },
}

/// Both configuration documents, with variables already substituted
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    pub variables: Variables,
    pub libraries: Vec<LibraryRecord>,
    pub placeholders: Placeholders,
}

impl SyncConfig {
    /// Load the dictionary and the library-set document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigMissingOrInvalid`] naming the offending file when
    /// either document is missing or cannot be parsed.
    pub fn load(dict_path: &NormalizedPath, sync_path: &NormalizedPath) -> Result<Self> {
        let store = ConfigStore::new();
        let variables: Variables = store.load(dict_path).map_err(|e| invalid(dict_path, e))?;
        let document: Value = store.load(sync_path).map_err(|e| invalid(sync_path, e))?;

        tracing::debug!(
            variables = variables.len(),
            dict = %dict_path,
            sync = %sync_path,
            "loaded configuration"
        );

        Self::from_document(variables, document)
            .map_err(|e| invalid(sync_path, e))
    }

    /// Build a config from an already parsed document.
    ///
    /// Every string in the document goes through variable substitution
    /// before it is interpreted.
    pub fn from_document(variables: Variables, mut document: Value) -> Result<Self> {
        let placeholders = Placeholders::default();
        expand_value(&mut document, &variables, &placeholders);

        let libraries = match serde_json::from_value::<LibraryDocument>(document)? {
            LibraryDocument::List(records) => records,
            LibraryDocument::Table { libraries } => libraries,
        };

        Ok(Self {
            variables,
            libraries,
            placeholders,
        })
    }

    /// Resolve every record into a draft.
    ///
    /// Disabled paths are dropped, `{name}` is replaced by the library name
    /// and relative paths are anchored to `base`.
    pub fn drafts(&self, base: &NormalizedPath) -> Vec<LibraryDraft> {
        self.libraries
            .iter()
            .map(|record| {
                let own_name: Variables = [(NAME_VARIABLE, record.name.as_str())]
                    .into_iter()
                    .collect();

                let paths = record
                    .paths
                    .iter()
                    .filter(|raw| {
                        let disabled = raw.starts_with(DISABLED_PREFIX);
                        if disabled {
                            tracing::debug!(library = %record.name, path = %raw, "path disabled");
                        }
                        !disabled
                    })
                    .map(|raw| {
                        let path = expand(raw, &own_name, &self.placeholders);
                        NormalizedPath::anchored(path, base)
                    })
                    .collect();

                LibraryDraft {
                    name: record.name.clone(),
                    paths,
                    whitelist: record.white_list.clone(),
                    blacklist: record.black_list.clone().unwrap_or_default(),
                }
            })
            .collect()
    }
}

fn invalid(path: &NormalizedPath, err: impl std::fmt::Display) -> Error {
    Error::ConfigMissingOrInvalid {
        path: path.clone(),
        reason: err.to_string(),
    }
}
