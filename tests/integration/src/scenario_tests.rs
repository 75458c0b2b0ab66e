//! Scenario tests across the libsync crates
//!
//! Each test sets up a realistic multi-site layout on disk, runs the
//! pipeline from configuration to reconciliation and checks the files that
//! are left behind.

use libsync_core::{
    BackupManager, FileCandidate, LibraryKind, SyncConfig, SyncEngine, SyncMode, SyncReport,
    validate,
};
use libsync_fs::compute_file_checksum;
use libsync_test_utils::TestTree;
use libsync_test_utils::config::{library, write_dict, write_sync};
use serde_json::json;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn run(tree: &TestTree, mode: SyncMode, run_name: &str) -> SyncReport {
    let base = tree.base();
    let config = SyncConfig::load(&base.join("dict.toml"), &base.join("sync.json")).unwrap();
    let libraries = validate(config.drafts(&base)).unwrap();
    let backups =
        BackupManager::with_run_name(base.join("backups"), config.variables.clone(), run_name);
    SyncEngine::new(backups).run(&libraries, mode)
}

/// Three sites: a web backend, a personal staging area and a work checkout
fn three_sites() -> TestTree {
    let tree = TestTree::new();
    let web = tree.mkdir("home/Projects/WebPage/backend");
    let staff = tree.mkdir("home/Desktop/MyStaff");
    let work = tree.mkdir("home/Work/Drivers/repos");
    write_dict(
        &tree,
        &[
            ("web", web.as_str()),
            ("staff", staff.as_str()),
            ("work", work.as_str()),
        ],
    );
    tree
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn edit_in_one_place_propagates_everywhere() {
    let tree = three_sites();
    for (i, site) in ["Projects/WebPage/backend", "Desktop/MyStaff", "Work/Drivers/repos"]
        .iter()
        .enumerate()
    {
        tree.write_at(&format!("home/{}/lib/crc.c", site), "crc v1\n", 100 + i as u64);
    }
    write_sync(
        &tree,
        &[library(
            "crc.c",
            &["{web}/lib/{name}", "{staff}/lib/{name}", "{work}/lib/{name}"],
        )],
    );

    // day 1: everything matches
    assert!(!run(&tree, SyncMode::Apply, "day-1").has_divergence());

    // day 2: the staging copy is edited
    tree.write_at("home/Desktop/MyStaff/lib/crc.c", "crc v2\n", 500);
    let report = run(&tree, SyncMode::Apply, "day-2");
    assert_eq!(report.updated_count(), 2);

    let expected = compute_file_checksum(&tree.native("home/Desktop/MyStaff/lib/crc.c")).unwrap();
    for site in ["home/Projects/WebPage/backend", "home/Work/Drivers/repos"] {
        let copy = tree.native(&format!("{}/lib/crc.c", site));
        assert_eq!(compute_file_checksum(&copy).unwrap(), expected);
    }
    assert_eq!(
        tree.files_under("backups/day-2"),
        vec!["{web}/lib/crc.c", "{work}/lib/crc.c"]
    );
}

#[test]
fn folder_library_syncs_each_file_independently() {
    let tree = three_sites();
    tree.write_at("home/Projects/WebPage/backend/proto/user.proto", "user v2", 300);
    tree.write_at("home/Desktop/MyStaff/protobuf/user.proto", "user v1", 100);
    tree.write_at("home/Desktop/MyStaff/protobuf/order.proto", "order v3", 400);
    tree.write_at("home/Projects/WebPage/backend/proto/order.proto", "order v2", 200);
    tree.write_at("home/Desktop/MyStaff/protobuf/scratch.proto", "wip", 900);
    let mut protobuf = library("protobuf", &["{web}/proto/", "{staff}/{name}/"]);
    protobuf["blackList"] = json!(["scratch.proto"]);
    write_sync(&tree, &[protobuf]);

    let base = tree.base();
    let config = SyncConfig::load(&base.join("dict.toml"), &base.join("sync.json")).unwrap();
    let libraries = validate(config.drafts(&base)).unwrap();
    assert_eq!(libraries[0].kind(), LibraryKind::Folder);

    let report = run(&tree, SyncMode::Apply, "run");
    let tags: Vec<_> = report.divergent().map(|g| (g.tag, g.name.as_str())).collect();
    assert_eq!(
        tags,
        vec![(Some(1), "protobuf/order.proto"), (Some(2), "protobuf/user.proto")]
    );

    tree.assert_file_eq("home/Projects/WebPage/backend/proto/order.proto", "order v3");
    tree.assert_file_eq("home/Desktop/MyStaff/protobuf/user.proto", "user v2");
    tree.assert_file_not_exists("home/Projects/WebPage/backend/proto/scratch.proto");
}

#[test]
fn dry_run_then_apply_agree_on_targets() {
    let tree = three_sites();
    tree.write_at("home/Projects/WebPage/backend/a.txt", "old", 10);
    tree.write_at("home/Desktop/MyStaff/a.txt", "new", 20);
    tree.write_at("home/Work/Drivers/repos/a.txt", "new", 15);
    write_sync(
        &tree,
        &[library("a.txt", &["{web}/{name}", "{staff}/{name}", "{work}/{name}"])],
    );

    let planned = run(&tree, SyncMode::DryRun, "plan");
    let group = planned.divergent().next().unwrap();
    let planned_targets: Vec<_> = group.obsolete().map(|(_, _, c)| c.path.clone()).collect();
    let synced: Vec<&FileCandidate> = group.synced().collect();
    assert_eq!(synced.len(), 1);

    let applied = run(&tree, SyncMode::Apply, "apply");
    let applied_targets: Vec<_> = applied.outcomes().map(|o| o.path.clone()).collect();
    assert_eq!(planned_targets, applied_targets);
    assert_eq!(applied.updated_count(), 1);
}

#[test]
fn repeated_backups_in_one_run_do_not_collide() {
    let tree = three_sites();
    tree.write_at("home/Work/Drivers/repos/x.cfg", "v1", 10);
    tree.write_at("home/Desktop/MyStaff/x.cfg", "v2", 20);
    write_sync(&tree, &[library("x.cfg", &["{staff}/{name}", "{work}/{name}"])]);

    let base = tree.base();
    let config = SyncConfig::load(&base.join("dict.toml"), &base.join("sync.json")).unwrap();
    let backups = BackupManager::with_run_name(base.join("backups"), config.variables, "same");
    let target = tree.path("home/Work/Drivers/repos/x.cfg");

    let first = backups.backup_file(&target).unwrap();
    let second = backups.backup_file(&target).unwrap();
    assert_ne!(first, second);
    assert_eq!(backups.list_run().unwrap().len(), 2);
}
