//! Run report types
//!
//! A [`SyncReport`] is built up library by library during one run. Divergent
//! groups are numbered in the order they are found (starting at 1), and
//! obsolete copies within a group are numbered the same way, giving every
//! obsolete copy a stable `N.M` tag for the diff view.

use std::fmt;
use std::str::FromStr;

use libsync_fs::NormalizedPath;

use super::engine::SyncMode;
use crate::evaluate::{ObsoleteCopy, Verdict, evaluate};
use crate::fingerprint::FileCandidate;
use crate::reconcile::ReconciliationOutcome;
use crate::{Error, Result};

/// Verdict (and, in apply mode, outcomes) for one comparison group
#[derive(Debug)]
pub struct GroupReport {
    pub library: String,
    /// Library name, or `library/filename` for folder libraries
    pub name: String,
    pub candidates: Vec<FileCandidate>,
    pub verdict: Verdict,
    /// Position among the divergent groups of the run, starting at 1
    pub tag: Option<usize>,
    pub outcomes: Vec<ReconciliationOutcome>,
}

impl GroupReport {
    /// Evaluate `candidates` and wrap the verdict.
    pub fn new(
        library: impl Into<String>,
        name: impl Into<String>,
        candidates: Vec<FileCandidate>,
    ) -> Self {
        let verdict = evaluate(&candidates);
        Self {
            library: library.into(),
            name: name.into(),
            candidates,
            verdict,
            tag: None,
            outcomes: Vec::new(),
        }
    }

    pub fn authoritative(&self) -> Option<&FileCandidate> {
        self.verdict
            .divergence()
            .map(|d| &self.candidates[d.authoritative])
    }

    /// Obsolete copies with their 1-based number within the group
    pub fn obsolete(&self) -> impl Iterator<Item = (usize, &ObsoleteCopy, &FileCandidate)> {
        self.verdict
            .divergence()
            .into_iter()
            .flat_map(|d| d.obsolete.iter())
            .enumerate()
            .map(|(i, o)| (i + 1, o, &self.candidates[o.index]))
    }

    /// Copies that already match the authoritative one
    pub fn synced(&self) -> impl Iterator<Item = &FileCandidate> {
        self.verdict
            .divergence()
            .into_iter()
            .flat_map(|d| d.synced.iter())
            .map(|&i| &self.candidates[i])
    }

    pub fn outcome_for(&self, path: &NormalizedPath) -> Option<&ReconciliationOutcome> {
        self.outcomes.iter().find(|o| &o.path == path)
    }
}

/// A library that could not be processed at all
#[derive(Debug)]
pub struct LibraryFailure {
    pub library: String,
    pub error: Error,
}

/// Accumulated result of one run
#[derive(Debug)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub groups: Vec<GroupReport>,
    pub failures: Vec<LibraryFailure>,
    divergent: usize,
}

impl SyncReport {
    pub fn new(mode: SyncMode) -> Self {
        Self {
            mode,
            groups: Vec::new(),
            failures: Vec::new(),
            divergent: 0,
        }
    }

    /// Append a group, numbering it if it is divergent.
    ///
    /// Returns the index of the group in [`SyncReport::groups`].
    pub fn push_group(&mut self, mut group: GroupReport) -> usize {
        if !group.verdict.is_consistent() {
            self.divergent += 1;
            group.tag = Some(self.divergent);
        }
        self.groups.push(group);
        self.groups.len() - 1
    }

    pub fn push_failure(&mut self, library: impl Into<String>, error: Error) {
        self.failures.push(LibraryFailure {
            library: library.into(),
            error,
        });
    }

    pub fn divergent(&self) -> impl Iterator<Item = &GroupReport> {
        self.groups.iter().filter(|g| g.tag.is_some())
    }

    pub fn has_divergence(&self) -> bool {
        self.divergent > 0
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &ReconciliationOutcome> {
        self.groups.iter().flat_map(|g| g.outcomes.iter())
    }

    pub fn updated_count(&self) -> usize {
        self.outcomes().filter(|o| o.is_success()).count()
    }

    pub fn failed_updates(&self) -> Vec<&ReconciliationOutcome> {
        self.outcomes().filter(|o| !o.is_success()).collect()
    }

    /// No library failed; with `strict`, no update failed either.
    pub fn is_success(&self, strict: bool) -> bool {
        self.failures.is_empty() && (!strict || self.failed_updates().is_empty())
    }

    /// Resolve an `N.M` tag to the two files it compares.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDiffSelector`] when group `N` or its obsolete copy `M`
    /// does not exist in this run.
    pub fn select(&self, selector: &DiffSelector) -> Result<DiffTarget<'_>> {
        let invalid = |reason: String| Error::InvalidDiffSelector {
            selector: selector.to_string(),
            reason,
        };

        let group = self
            .divergent()
            .find(|g| g.tag == Some(selector.group))
            .ok_or_else(|| {
                invalid(format!(
                    "there are {} group(s) with obsolete files",
                    self.divergent
                ))
            })?;

        let count = group.obsolete().count();
        let (_, _, obsolete) = group
            .obsolete()
            .find(|(number, _, _)| *number == selector.obsolete)
            .ok_or_else(|| {
                invalid(format!("{} has {} obsolete file(s)", group.name, count))
            })?;

        let authoritative = group
            .authoritative()
            .ok_or_else(|| invalid(format!("{} is consistent", group.name)))?;

        Ok(DiffTarget {
            name: &group.name,
            authoritative: &authoritative.path,
            obsolete: &obsolete.path,
        })
    }
}

/// `N.M`: obsolete copy `M` of divergent group `N`, both starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffSelector {
    pub group: usize,
    pub obsolete: usize,
}

impl fmt::Display for DiffSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.obsolete)
    }
}

impl FromStr for DiffSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDiffSelector {
            selector: s.to_string(),
            reason: reason.to_string(),
        };

        let (group, obsolete) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| invalid("expected <latest>.<obsolete>, e.g. 1.1"))?;
        let group = number(group).ok_or_else(|| invalid("group number is not a positive integer"))?;
        let obsolete = number(obsolete)
            .ok_or_else(|| invalid("obsolete number is not a positive integer"))?;
        if group == 0 || obsolete == 0 {
            return Err(invalid("numbering starts at 1"));
        }

        Ok(Self { group, obsolete })
    }
}

/// Plain ASCII digits only; `usize::from_str` would also take a `+` sign.
fn number(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// The two files addressed by a [`DiffSelector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffTarget<'a> {
    pub name: &'a str,
    pub authoritative: &'a NormalizedPath,
    pub obsolete: &'a NormalizedPath,
}
