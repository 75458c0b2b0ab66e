//! Command implementations for libsync-cli

pub mod diff;
pub mod example;
pub mod sync;

use colored::{ColoredString, Colorize};

pub use example::run_example;
pub use sync::{SyncArgs, run_sync};

/// Print the version and where the project lives
pub fn print_version() {
    println!("libsync {}", env!("CARGO_PKG_VERSION").blue());
    println!("Repo: {}", env!("CARGO_PKG_REPOSITORY").cyan());
}

// Line prefixes shared by every command

pub(crate) fn info_tag() -> ColoredString {
    "INF".blue()
}

pub(crate) fn ok_tag() -> ColoredString {
    "OK".green().bold()
}

pub(crate) fn warn_tag() -> ColoredString {
    "WRN".yellow().bold()
}

pub(crate) fn err_tag() -> ColoredString {
    "ERR".red().bold()
}

pub(crate) fn hint_tag() -> ColoredString {
    "=>".blue().bold()
}
