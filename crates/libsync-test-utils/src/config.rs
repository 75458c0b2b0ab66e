//! Writers for the two configuration documents.

use std::collections::BTreeMap;

use libsync_fs::NormalizedPath;
use serde_json::{Value, json};

use crate::TestTree;

/// A library record in the shape `sync.json` expects.
///
/// Paths are written as given, so they may carry `{variables}` and `#`.
pub fn library(name: &str, paths: &[&str]) -> Value {
    json!({ "name": name, "paths": paths })
}

/// Write `dict.toml` at the root of `tree`.
pub fn write_dict(tree: &TestTree, variables: &[(&str, &str)]) -> NormalizedPath {
    let map: BTreeMap<&str, &str> = variables.iter().copied().collect();
    let text = toml::to_string(&map).unwrap();
    tree.write("dict.toml", &text)
}

/// Write `sync.json` at the root of `tree`.
pub fn write_sync(tree: &TestTree, libraries: &[Value]) -> NormalizedPath {
    let text = serde_json::to_string_pretty(&Value::Array(libraries.to_vec())).unwrap();
    tree.write("sync.json", &text)
}
