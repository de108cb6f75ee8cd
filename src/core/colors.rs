//! Unified color system for repository summaries.
//!
//! # Public API
//! - [`get_category_color_style`]: Color function for an entry category
//! - [`get_health_color_style`]: Color function for a repository's overall health
//! - [`RepositoryHealth`]: Clean, changed or needing attention
//!
//! # Color Scheme
//! - **Modified / Added / Renamed / Copied / Untracked**: Yellow
//! - **Deleted / Ignored / Unmerged**: Red (Unmerged also bold)
//! - **Type changed**: Magenta

use crate::core::git_status::EntryCategory;
use crate::core::model::RepositoryStatus;
use colored::*;

/// Single function to apply color styling based on entry category
pub fn get_category_color_style(category: EntryCategory) -> Box<dyn Fn(&str) -> ColoredString> {
    match category {
        EntryCategory::Modified
        | EntryCategory::Added
        | EntryCategory::Renamed
        | EntryCategory::Copied
        | EntryCategory::Untracked => Box::new(|text: &str| text.yellow()),
        EntryCategory::TypeChanged => Box::new(|text: &str| text.magenta()),
        EntryCategory::Deleted | EntryCategory::Ignored => Box::new(|text: &str| text.red()),
        EntryCategory::Unmerged => Box::new(|text: &str| text.red().bold()),
    }
}

/// Overall state of a repository, worst category wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RepositoryHealth {
    Clean,
    Changed,
    Attention,
}

impl RepositoryHealth {
    pub fn of(status: &RepositoryStatus) -> Self {
        if !status.online
            || !status.unmerged.is_empty()
            || !status.ignored.is_empty()
            || status.deleted().next().is_some()
        {
            RepositoryHealth::Attention
        } else if status.is_clean() {
            RepositoryHealth::Clean
        } else {
            RepositoryHealth::Changed
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            RepositoryHealth::Clean => "✓",
            RepositoryHealth::Changed => "⚠",
            RepositoryHealth::Attention => "!",
        }
    }
}

pub fn get_health_color_style(health: RepositoryHealth) -> Box<dyn Fn(&str) -> ColoredString> {
    match health {
        RepositoryHealth::Clean => Box::new(|text: &str| text.green()),
        RepositoryHealth::Changed => Box::new(|text: &str| text.yellow()),
        RepositoryHealth::Attention => Box::new(|text: &str| text.red()),
    }
}
