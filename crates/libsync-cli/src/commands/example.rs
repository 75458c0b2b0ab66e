//! Example command implementation
//!
//! Writes a starter dictionary and library-set document. Existing files are
//! never overwritten.

use colored::Colorize;
use serde::Serialize;

use libsync_core::{LibraryRecord, Variables};
use libsync_fs::{ConfigStore, NormalizedPath};

use super::{err_tag, ok_tag};
use crate::context::Workspace;
use crate::error::{CliError, Result};

/// TOML has no top-level arrays, so a `.toml` library set is wrapped
#[derive(Serialize)]
struct LibraryTable<'a> {
    libraries: &'a [LibraryRecord],
}

/// Run the example command
pub fn run_example(workspace: &Workspace) -> Result<()> {
    let store = ConfigStore::new();
    let home = dirs::home_dir()
        .map(NormalizedPath::new)
        .unwrap_or_else(|| workspace.base.clone());

    let mut refused = 0;

    if refuse_existing(&workspace.dict) {
        refused += 1;
    } else {
        store.save(&workspace.dict, &example_dictionary(&home))?;
        generated(&workspace.dict);
    }

    if refuse_existing(&workspace.sync) {
        refused += 1;
    } else {
        let libraries = example_libraries();
        if workspace.sync.extension() == Some("toml") {
            store.save(&workspace.sync, &LibraryTable { libraries: &libraries })?;
        } else {
            store.save(&workspace.sync, &libraries)?;
        }
        generated(&workspace.sync);
    }

    if refused > 0 {
        return Err(CliError::user(format!(
            "{} example file(s) not written",
            refused
        )));
    }
    Ok(())
}

fn refuse_existing(path: &NormalizedPath) -> bool {
    if !path.exists() {
        return false;
    }
    println!(
        "{} File {} already exists. Delete it to generate the example",
        err_tag(),
        path.as_str().red()
    );
    true
}

fn generated(path: &NormalizedPath) {
    println!(
        "{} Template file {} has been generated",
        ok_tag(),
        path.as_str().green()
    );
}

/// Three base locations under the user's home directory
pub fn example_dictionary(home: &NormalizedPath) -> Variables {
    [
        ("web", home.join("Projects/WebPage/backend")),
        ("staff", home.join("Desktop/MyStaff/test")),
        ("work", home.join("Work/Drivers/repos")),
    ]
    .into_iter()
    .map(|(key, path)| (key, path.as_str().to_string()))
    .collect()
}

/// A file library, a file library with a disabled path, and a folder library
pub fn example_libraries() -> Vec<LibraryRecord> {
    let record = |name: &str, paths: &[&str]| LibraryRecord {
        name: name.to_string(),
        paths: paths.iter().map(|p| p.to_string()).collect(),
        white_list: None,
        black_list: None,
    };

    vec![
        record("serial_port.c", &["{staff}/serial.c", "{work}/PLC/{name}"]),
        record(
            "utils",
            &[
                "{web}/lib/{name}",
                "#{staff}/python/{name}.py",
                "{work}/PLC/misc.py",
            ],
        ),
        LibraryRecord {
            black_list: Some(vec!["generated.proto".to_string()]),
            ..record("protobuf", &["{web}/proto/", "{staff}/{name}/"])
        },
    ]
}
