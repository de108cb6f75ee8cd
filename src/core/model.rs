//! Structured status model shared by the parser, normalizer and renderers.
//!
//! # Public API
//! - [`Oid`] / [`Head`]: Branch header values including git's sentinels
//! - [`BranchInfo`]: Full branch metadata of a working tree repository
//! - [`HeadRef`]: The commit/branch pair, all a bare repository exposes
//! - [`BranchState`]: Either of the two above
//! - [`ChangedEntry`]: One changed path with both sides of its status code
//! - [`RepositoryStatus`]: Everything known about one repository

use crate::core::git_status::{EntryCategory, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commit the branch points at, `(initial)` on an unborn branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Oid {
    Initial,
    Commit(String),
}

impl Oid {
    pub fn parse(value: &str) -> Oid {
        match value {
            "(initial)" => Oid::Initial,
            hash => Oid::Commit(hash.to_string()),
        }
    }

    /// First seven characters of the hash, for display
    pub fn short(&self) -> &str {
        match self {
            Oid::Initial => "(initial)",
            Oid::Commit(hash) => hash.get(..7).unwrap_or(hash),
        }
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Oid::Initial => write!(f, "(initial)"),
            Oid::Commit(hash) => write!(f, "{hash}"),
        }
    }
}

/// Checked out branch, `(detached)` when HEAD is detached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Head {
    Detached,
    Branch(String),
}

impl Head {
    pub fn parse(value: &str) -> Head {
        match value {
            "(detached)" => Head::Detached,
            name => Head::Branch(name.to_string()),
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Head::Detached => write!(f, "(detached)"),
            Head::Branch(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub oid: Oid,
    pub head: Head,
    pub upstream: Option<String>,
    /// Only meaningful with an upstream, but always readable
    pub ahead: u32,
    pub behind: u32,
}

impl BranchInfo {
    pub fn new(oid: Oid, head: Head) -> Self {
        Self {
            oid,
            head,
            upstream: None,
            ahead: 0,
            behind: 0,
        }
    }

    pub fn head_ref(&self) -> HeadRef {
        HeadRef {
            oid: self.oid.clone(),
            head: self.head.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadRef {
    pub oid: Oid,
    pub head: Head,
}

/// Branch metadata as far as the repository kind allows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchState {
    /// Working tree repository with upstream tracking information
    Tracking(BranchInfo),
    /// Bare repository, no reliable ahead/behind telemetry
    HeadOnly(HeadRef),
}

impl BranchState {
    pub fn oid(&self) -> &Oid {
        match self {
            BranchState::Tracking(info) => &info.oid,
            BranchState::HeadOnly(head_ref) => &head_ref.oid,
        }
    }

    pub fn head(&self) -> &Head {
        match self {
            BranchState::Tracking(info) => &info.head,
            BranchState::HeadOnly(head_ref) => &head_ref.head,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedEntry {
    pub path: String,
    /// Source path, only for renamed or copied entries
    pub original_path: Option<String>,
    pub index_status: StatusCode,
    pub worktree_status: StatusCode,
    pub category: EntryCategory,
    pub staged: bool,
    /// Rename or copy similarity percentage
    pub score: Option<u8>,
}

impl ChangedEntry {
    /// Changed in the index and changed again in the working tree
    pub fn is_partially_staged(&self) -> bool {
        self.index_status.is_changed() && self.worktree_status.is_changed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepositoryStatus {
    pub name: String,
    pub branch: Option<BranchState>,
    /// Ordinary and renamed/copied entries in the order git reported them
    pub entries: Vec<ChangedEntry>,
    pub unmerged: Vec<ChangedEntry>,
    pub untracked: Vec<String>,
    pub ignored: Vec<String>,
    /// False when git produced no branch headers at all
    pub online: bool,
}

impl RepositoryStatus {
    /// Status of a repository git could not be queried for
    pub fn offline(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn branch_info(&self) -> Option<&BranchInfo> {
        match &self.branch {
            Some(BranchState::Tracking(info)) => Some(info),
            _ => None,
        }
    }

    pub fn modified(&self) -> impl Iterator<Item = &ChangedEntry> {
        self.in_category(EntryCategory::Modified)
    }

    pub fn renamed(&self) -> impl Iterator<Item = &ChangedEntry> {
        self.in_category(EntryCategory::Renamed)
    }

    pub fn deleted(&self) -> impl Iterator<Item = &ChangedEntry> {
        self.in_category(EntryCategory::Deleted)
    }

    pub fn in_category(&self, category: EntryCategory) -> impl Iterator<Item = &ChangedEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
            && self.unmerged.is_empty()
            && self.untracked.is_empty()
            && self.ignored.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, index: StatusCode, worktree: StatusCode) -> ChangedEntry {
        let (category, staged) = EntryCategory::derive(index, worktree).unwrap();
        ChangedEntry {
            path: path.to_string(),
            original_path: None,
            index_status: index,
            worktree_status: worktree,
            category,
            staged,
            score: None,
        }
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(Oid::parse("(initial)"), Oid::Initial);
        assert_eq!(Oid::parse("abc123"), Oid::Commit("abc123".to_string()));
        assert_eq!(Head::parse("(detached)"), Head::Detached);
        assert_eq!(Head::parse("main"), Head::Branch("main".to_string()));
        assert_eq!(Head::Detached.to_string(), "(detached)");
    }

    #[test]
    fn test_oid_short() {
        let oid = Oid::Commit("0123456789abcdef".to_string());
        assert_eq!(oid.short(), "0123456");
        assert_eq!(Oid::Commit("abc".to_string()).short(), "abc");
    }

    #[test]
    fn test_buckets_preserve_order() {
        let status = RepositoryStatus {
            name: "repo".to_string(),
            entries: vec![
                entry("b.txt", StatusCode::Unmodified, StatusCode::Modified),
                entry("gone.txt", StatusCode::Deleted, StatusCode::Unmodified),
                entry("a.txt", StatusCode::Modified, StatusCode::Unmodified),
            ],
            online: true,
            ..Default::default()
        };

        let modified: Vec<_> = status.modified().map(|e| e.path.as_str()).collect();
        assert_eq!(modified, vec!["b.txt", "a.txt"]);
        assert_eq!(status.deleted().count(), 1);
        assert_eq!(status.renamed().count(), 0);
        assert!(!status.is_clean());
    }

    #[test]
    fn test_partially_staged() {
        assert!(entry("f", StatusCode::Modified, StatusCode::Modified).is_partially_staged());
        assert!(!entry("f", StatusCode::Unmodified, StatusCode::Modified).is_partially_staged());
    }

    #[test]
    fn test_offline_status() {
        let status = RepositoryStatus::offline("missing");
        assert!(!status.online);
        assert!(status.branch.is_none());
        assert!(status.is_clean());
        assert_eq!(status.name, "missing");
    }

    #[test]
    fn test_branch_state_accessors() {
        let info = BranchInfo::new(Oid::Initial, Head::Branch("main".to_string()));
        let head_only = BranchState::HeadOnly(info.head_ref());
        assert_eq!(head_only.oid(), &Oid::Initial);
        assert_eq!(head_only.head(), &Head::Branch("main".to_string()));
    }
}
