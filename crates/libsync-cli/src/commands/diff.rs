//! Diff command implementation
//!
//! Shows how an obsolete copy differs from the latest one, as a unified diff
//! from the obsolete file to the latest file.

use colored::Colorize;
use similar::TextDiff;

use libsync_core::{DiffSelector, SyncReport};
use libsync_fs::{NormalizedPath, io};

use super::{info_tag, warn_tag};
use crate::error::Result;

/// Lines of unchanged context around each hunk
const CONTEXT_LINES: usize = 3;

/// Print the diff selected by `selector` from a dry-run report.
pub fn print_diff(report: &SyncReport, selector: &DiffSelector) -> Result<()> {
    let target = report.select(selector)?;
    let obsolete = read_lossy(target.obsolete)?;
    let latest = read_lossy(target.authoritative)?;

    println!(
        "{} Difference file {}, tag {}:",
        info_tag(),
        target.name.blue(),
        selector.to_string().green()
    );

    let diff = unified(
        &obsolete,
        &latest,
        target.obsolete.as_str(),
        target.authoritative.as_str(),
    );
    for line in diff.lines() {
        println!("{}", colorize(line));
    }
    Ok(())
}

/// File content as text; bytes that are not UTF-8 become U+FFFD.
fn read_lossy(path: &NormalizedPath) -> Result<String> {
    let bytes = io::read_bytes(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            println!(
                "{} {} is not UTF-8 text, invalid bytes are shown as U+FFFD",
                warn_tag(),
                path.as_str().dimmed()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

/// Unified diff from `old` to `new`.
pub fn unified(old: &str, new: &str, old_name: &str, new_name: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(old_name, new_name)
        .to_string()
}

fn colorize(line: &str) -> colored::ColoredString {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold()
    } else if line.starts_with("@@") {
        line.cyan()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else {
        line.normal()
    }
}
