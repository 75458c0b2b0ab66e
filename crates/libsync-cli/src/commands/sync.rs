//! Sync command implementation
//!
//! Loads and validates the configuration, runs the engine and prints the
//! report. Without `--update` nothing on disk changes.

use std::time::SystemTime;

use chrono::{DateTime, Local};
use colored::Colorize;

use libsync_core::{
    BackupManager, DiffSelector, Error, GroupReport, SyncConfig, SyncEngine, SyncMode, SyncReport,
    validate,
};

use super::diff::print_diff;
use super::{err_tag, hint_tag, info_tag, ok_tag, warn_tag};
use crate::context::Workspace;
use crate::error::{CliError, Result};

/// Options of a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncArgs {
    pub mode: SyncMode,
    /// Also list consistent groups and up-to-date copies
    pub info: bool,
    /// Treat failed updates as an error
    pub strict: bool,
    /// Raw `N.M` tag to diff after the report
    pub diff: Option<String>,
}

/// Run the sync command
pub fn run_sync(workspace: &Workspace, args: &SyncArgs) -> Result<()> {
    // a malformed tag fails before anything is read
    let selector = args
        .diff
        .as_deref()
        .map(str::parse::<DiffSelector>)
        .transpose()?;

    let config = SyncConfig::load(&workspace.dict, &workspace.sync)?;
    let libraries = match validate(config.drafts(&workspace.base)) {
        Ok(libraries) => libraries,
        Err(Error::Validation { issues }) => {
            for issue in &issues {
                println!("{} {}", err_tag(), issue);
            }
            return Err(CliError::user(format!(
                "{} problem(s) found in {}",
                issues.len(),
                workspace.sync
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let engine = SyncEngine::new(BackupManager::new(
        workspace.backups.clone(),
        config.variables.clone(),
    ));
    let report = engine.run(&libraries, args.mode);

    print_report(&report, args, selector.as_ref());
    print_summary(&report, &engine);

    if let Some(selector) = selector {
        print_diff(&report, &selector)?;
    }

    if !report.failures.is_empty() {
        return Err(CliError::user(format!(
            "{} library(ies) could not be synchronized",
            report.failures.len()
        )));
    }
    if !report.is_success(args.strict) {
        return Err(CliError::user(format!(
            "{} update(s) failed",
            report.failed_updates().len()
        )));
    }
    Ok(())
}

fn print_report(report: &SyncReport, args: &SyncArgs, selector: Option<&DiffSelector>) {
    let list_synced = args.info || report.mode == SyncMode::Apply;

    for group in &report.groups {
        match group.tag {
            Some(tag) => print_divergent(group, tag, report.mode, list_synced, selector),
            None if args.info => print_consistent(group),
            None => {}
        }
    }

    for failure in &report.failures {
        println!("{} {}", err_tag(), failure.error);
    }
}

fn print_divergent(
    group: &GroupReport,
    tag: usize,
    mode: SyncMode,
    list_synced: bool,
    selector: Option<&DiffSelector>,
) {
    let Some(latest) = group.authoritative() else {
        return;
    };
    let ico = if mode == SyncMode::Apply {
        ok_tag()
    } else {
        info_tag()
    };
    println!(
        "{} {}{} Latest file {}: {} {}",
        ico,
        tag.to_string().yellow(),
        ".x".dimmed(),
        group.name.blue(),
        latest.path.as_str().dimmed(),
        timestamp(latest.modified).cyan()
    );

    for (number, obsolete, candidate) in group.obsolete() {
        let label = format!("{}.{}", tag, number);
        let label = if selector.is_some_and(|s| s.group == tag && s.obsolete == number) {
            label.green().bold()
        } else {
            label.yellow()
        };
        let path = candidate.path.as_str().dimmed();

        match group.outcome_for(&candidate.path) {
            Some(outcome) if outcome.is_success() => {
                println!("    {} File {} update {}", label, path, "OK".green().bold());
                if let Some(backup) = &outcome.backup {
                    println!("        backup {}", backup.as_str().dimmed());
                }
            }
            Some(outcome) => {
                let reason = match &outcome.error {
                    Some(Error::UpdateFailed { reason, .. }) => reason.clone(),
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                println!(
                    "    {} File {} update {} {}",
                    label,
                    path,
                    "failed".red().bold(),
                    reason.dimmed()
                );
            }
            None => {
                println!(
                    "    {} Obsolete file: {} needs update {}",
                    label,
                    path,
                    timestamp(candidate.modified).yellow()
                );
                if obsolete.suspiciously_new {
                    println!(
                        "{} But it was created recently, make sure it's not actually newer!",
                        warn_tag()
                    );
                }
            }
        }
    }

    if list_synced {
        for candidate in group.synced() {
            println!(
                "{} File {} is up-to-date",
                ok_tag(),
                candidate.path.as_str().dimmed()
            );
        }
    }
}

fn print_consistent(group: &GroupReport) {
    println!("{} {} is up-to-date", ok_tag(), group.name.blue());
    for candidate in &group.candidates {
        println!(
            "    File {} {}",
            candidate.path.as_str().dimmed(),
            timestamp(candidate.modified).cyan()
        );
    }
}

fn print_summary(report: &SyncReport, engine: &SyncEngine) {
    if !report.has_divergence() {
        println!(
            "{} All files are in the same version {}",
            info_tag(),
            "(no update is needed)".dimmed()
        );
        return;
    }

    match report.mode {
        SyncMode::DryRun => {
            println!(
                "{} Update older files using {} {} flag",
                hint_tag(),
                "-u".yellow(),
                "--update".dimmed()
            );
            println!(
                "{} Display files changes using {} {} flag",
                hint_tag(),
                "-d".yellow(),
                "--diff".dimmed()
            );
        }
        SyncMode::Apply => {
            println!("{} {} file(s) updated", ok_tag(), report.updated_count());
            if report.outcomes().any(|o| o.backup.is_some()) {
                println!(
                    "{} Previous versions saved in {}",
                    info_tag(),
                    engine.backups().run_dir().as_str().dimmed()
                );
            }
            let failed = report.failed_updates().len();
            if failed > 0 {
                println!("{} {} update(s) failed", err_tag(), failed);
            }
        }
    }
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
