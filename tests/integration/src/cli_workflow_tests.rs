//! End-to-end workflows through the libsync binary
//!
//! Mirrors how the tool is used day to day: generate a starting
//! configuration, inspect, diff, then update.

use assert_cmd::Command;
use libsync_test_utils::TestTree;
use libsync_test_utils::config::{library, write_dict, write_sync};
use predicates::prelude::*;

fn libsync_cmd(tree: &TestTree) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("libsync"));
    cmd.current_dir(tree.root())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("LIBSYNC_SYNC_FILE")
        .env_remove("LIBSYNC_DICT_FILE")
        .env_remove("LIBSYNC_BACKUP_DIR")
        .env_remove("LIBSYNC_BASE_DIR");
    cmd
}

#[test]
fn inspect_diff_update_cycle() {
    let tree = TestTree::new();
    let a = tree.mkdir("site-a");
    let b = tree.mkdir("site-b");
    let c = tree.mkdir("site-c");
    write_dict(&tree, &[("a", a.as_str()), ("b", b.as_str()), ("c", c.as_str())]);
    tree.write_at("site-a/uart.h", "#define BAUD 9600\n", 100);
    tree.write_at("site-b/uart.h", "#define BAUD 115200\n", 300);
    tree.write_at("site-c/uart.h", "#define BAUD 57600\n", 200);
    write_sync(&tree, &[library("uart.h", &["{a}/{name}", "{b}/{name}", "{c}/{name}"])]);

    libsync_cmd(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("1.x Latest file uart.h"))
        .stdout(predicate::str::contains("1.1 Obsolete file:"))
        .stdout(predicate::str::contains("1.2 Obsolete file:"));

    // 1.2 is the copy under site-c
    libsync_cmd(&tree)
        .args(["--diff", "1.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("site-c/uart.h"))
        .stdout(predicate::str::contains("-#define BAUD 57600"))
        .stdout(predicate::str::contains("+#define BAUD 115200"));

    libsync_cmd(&tree)
        .args(["--update", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 file(s) updated"));

    for site in ["site-a", "site-b", "site-c"] {
        tree.assert_file_eq(&format!("{}/uart.h", site), "#define BAUD 115200\n");
    }
    assert_eq!(tree.files_under("backups").len(), 2);

    libsync_cmd(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("All files are in the same version"));
}

#[test]
fn example_then_custom_config_location() {
    let tree = TestTree::new();
    tree.mkdir("conf");

    libsync_cmd(&tree)
        .args(["--example", "--base-dir", "conf", "--dict-file", "vars.yaml"])
        .assert()
        .success();

    tree.assert_file_exists("conf/vars.yaml");
    tree.assert_file_exists("conf/sync.json");
    tree.assert_file_not_exists("dict.toml");

    // the example points at paths that do not exist here
    libsync_cmd(&tree)
        .args(["--base-dir", "conf", "--dict-file", "vars.yaml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("doesn't exist"));
}
