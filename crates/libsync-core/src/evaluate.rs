//! Consistency evaluation of a comparison group
//!
//! Pure decision logic; nothing here touches the filesystem.

use crate::fingerprint::FileCandidate;

/// An obsolete copy, by index into the evaluated candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObsoleteCopy {
    pub index: usize,
    /// Created and modified times are equal: the copy may be a brand new
    /// file rather than a stale one, so the authoritative choice is suspect.
    pub suspiciously_new: bool,
}

/// A group whose copies do not all match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Index of the most recently modified candidate
    pub authoritative: usize,
    /// Candidates whose checksum differs from the authoritative one, in input order
    pub obsolete: Vec<ObsoleteCopy>,
    /// Other candidates that already match the authoritative checksum
    pub synced: Vec<usize>,
}

/// Outcome of comparing a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Fewer than two copies, or all checksums equal
    Consistent,
    Divergent(Divergence),
}

impl Verdict {
    pub fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent)
    }

    pub fn divergence(&self) -> Option<&Divergence> {
        match self {
            Self::Consistent => None,
            Self::Divergent(divergence) => Some(divergence),
        }
    }
}

/// Classify a group of fingerprinted copies.
///
/// The authoritative copy is the one with the greatest modification time;
/// among equal maxima the first one in input order wins.
pub fn evaluate(candidates: &[FileCandidate]) -> Verdict {
    let Some(first) = candidates.first() else {
        return Verdict::Consistent;
    };
    if candidates.iter().all(|c| c.checksum == first.checksum) {
        return Verdict::Consistent;
    }

    let mut authoritative = 0;
    for (index, candidate) in candidates.iter().enumerate().skip(1) {
        if candidate.modified > candidates[authoritative].modified {
            authoritative = index;
        }
    }
    let latest = &candidates[authoritative];

    let mut obsolete = Vec::new();
    let mut synced = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.checksum != latest.checksum {
            obsolete.push(ObsoleteCopy {
                index,
                suspiciously_new: candidate.created == candidate.modified,
            });
        } else if candidate.path != latest.path {
            synced.push(index);
        }
    }

    Verdict::Divergent(Divergence {
        authoritative,
        obsolete,
        synced,
    })
}
