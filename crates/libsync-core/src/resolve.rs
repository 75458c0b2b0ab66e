//! Placeholder substitution in path templates
//!
//! Library paths are written as templates such as `{work}/PLC/{name}`. The
//! variable dictionary maps short names to base paths and is substituted
//! with a plain string replacement per variable:
//!
//! - variables are applied in sorted key order, so a value that itself
//!   contains a placeholder is expanded only if its key sorts later;
//! - there is no escaping;
//! - a placeholder with no matching variable is left untouched.

use std::collections::BTreeMap;

use libsync_fs::NormalizedPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open/close delimiters of a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub open: String,
    pub close: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::new("{", "}")
    }
}

impl Placeholders {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// `work` -> `{work}`
    pub fn wrap(&self, key: &str) -> String {
        format!("{}{}{}", self.open, key, self.close)
    }
}

/// The variable dictionary: short name -> base path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, String>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Find the variable whose value is the longest component prefix of `path`.
    ///
    /// Returns the variable name and the remainder of the path (without a
    /// leading slash). Used to give backups and console output a
    /// location-independent name.
    pub fn reverse_lookup<'p>(&self, path: &'p NormalizedPath) -> Option<(&str, &'p str)> {
        let mut best: Option<(&str, &'p str, usize)> = None;
        for (key, value) in self.iter() {
            if value.trim().is_empty() {
                continue;
            }
            let value = NormalizedPath::new(value);
            if let Some(rest) = path.strip_prefix(value.as_str()) {
                let len = value.as_str().len();
                if best.is_none_or(|(_, _, best_len)| len > best_len) {
                    best = Some((key, rest, len));
                }
            }
        }
        best.map(|(key, rest, _)| (key, rest))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Replace every `{key}` in `template` with its value.
pub fn expand(template: &str, variables: &Variables, placeholders: &Placeholders) -> String {
    variables
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&placeholders.wrap(key), value)
        })
}

/// Apply [`expand`] to every string inside a JSON document.
///
/// Arrays and object values are visited recursively; object keys are kept
/// as they are.
pub fn expand_value(value: &mut Value, variables: &Variables, placeholders: &Placeholders) {
    match value {
        Value::String(s) => *s = expand(s, variables, placeholders),
        Value::Array(items) => {
            for item in items {
                expand_value(item, variables, placeholders);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                expand_value(item, variables, placeholders);
            }
        }
        _ => {}
    }
}
