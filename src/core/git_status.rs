//! Type-safe porcelain status codes and entry categories.
//!
//! Porcelain v2 describes every changed path with a two character `XY` code:
//! `X` is the state of the index (staged side) and `Y` the state of the working
//! tree (unstaged side). [`StatusCode`] models one of those characters and
//! [`EntryCategory`] is the single classification shown to users.
//!
//! # Public API
//! - [`StatusCode`]: One `XY` character (`. M T A D R C U`)
//! - [`EntryCategory`]: Derived per-entry classification
//!
//! # Derivation rule
//! When the working tree side is changed the category comes from it and the
//! entry is unstaged; otherwise it comes from the index side and the entry is
//! staged. Both codes stay available on the entry so callers may apply a
//! different rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a porcelain v2 `XY` status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// No change on this side (.)
    Unmodified,
    /// Modified (M)
    Modified,
    /// File type changed (T)
    TypeChanged,
    /// Added (A)
    Added,
    /// Deleted (D)
    Deleted,
    /// Renamed (R)
    Renamed,
    /// Copied (C)
    Copied,
    /// Updated but unmerged (U)
    Unmerged,
}

impl StatusCode {
    /// Parse a single porcelain status character
    pub fn from_char(code: char) -> Option<StatusCode> {
        match code {
            '.' => Some(StatusCode::Unmodified),
            'M' => Some(StatusCode::Modified),
            'T' => Some(StatusCode::TypeChanged),
            'A' => Some(StatusCode::Added),
            'D' => Some(StatusCode::Deleted),
            'R' => Some(StatusCode::Renamed),
            'C' => Some(StatusCode::Copied),
            'U' => Some(StatusCode::Unmerged),
            _ => None,
        }
    }

    /// Parse a two character `XY` field into (index, worktree) codes
    pub fn parse_pair(xy: &str) -> Option<(StatusCode, StatusCode)> {
        let mut chars = xy.chars();
        let index = StatusCode::from_char(chars.next()?)?;
        let worktree = StatusCode::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some((index, worktree))
    }

    pub fn as_char(&self) -> char {
        match self {
            StatusCode::Unmodified => '.',
            StatusCode::Modified => 'M',
            StatusCode::TypeChanged => 'T',
            StatusCode::Added => 'A',
            StatusCode::Deleted => 'D',
            StatusCode::Renamed => 'R',
            StatusCode::Copied => 'C',
            StatusCode::Unmerged => 'U',
        }
    }

    pub fn is_changed(&self) -> bool {
        !matches!(self, StatusCode::Unmodified)
    }

    /// Category this code maps to, `None` for [`StatusCode::Unmodified`]
    pub fn category(&self) -> Option<EntryCategory> {
        match self {
            StatusCode::Unmodified => None,
            StatusCode::Modified => Some(EntryCategory::Modified),
            StatusCode::TypeChanged => Some(EntryCategory::TypeChanged),
            StatusCode::Added => Some(EntryCategory::Added),
            StatusCode::Deleted => Some(EntryCategory::Deleted),
            StatusCode::Renamed => Some(EntryCategory::Renamed),
            StatusCode::Copied => Some(EntryCategory::Copied),
            StatusCode::Unmerged => Some(EntryCategory::Unmerged),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Classification of a single changed path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryCategory {
    Modified,
    TypeChanged,
    Added,
    Deleted,
    Renamed,
    Copied,
    Untracked,
    Ignored,
    /// Conflicted path waiting for a merge resolution
    Unmerged,
}

impl EntryCategory {
    /// Derive the category and staged flag from an `XY` pair.
    ///
    /// Returns `None` when neither side records a change.
    pub fn derive(index: StatusCode, worktree: StatusCode) -> Option<(EntryCategory, bool)> {
        if let Some(category) = worktree.category() {
            return Some((category, false));
        }
        index.category().map(|category| (category, true))
    }

    /// Get human-readable description for the category
    pub fn description(&self) -> &'static str {
        match self {
            EntryCategory::Modified => "modified",
            EntryCategory::TypeChanged => "typechange",
            EntryCategory::Added => "new file",
            EntryCategory::Deleted => "deleted",
            EntryCategory::Renamed => "renamed",
            EntryCategory::Copied => "copied",
            EntryCategory::Untracked => "untracked",
            EntryCategory::Ignored => "ignored",
            EntryCategory::Unmerged => "unmerged",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
