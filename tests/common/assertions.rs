//! Common assertion helpers for git-fleet output
//!
//! Tests run the binary with `NO_COLOR` set, so plain substring predicates
//! match the rendered lines.

#![allow(dead_code)]

use predicates::prelude::*;

/// Header line of a repository with nothing to report
pub fn clean_repo(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("✓ {name} "))
}

/// Header line of a repository with local changes
pub fn changed_repo(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("⚠ {name} "))
}

pub fn offline_repo(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("! {name} offline"))
}

/// Indented entry line such as `modified: src/lib.rs`
pub fn has_entry(category: &str, path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{category}: {path}"))
}

pub fn has_summary(count: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("{count} repositories synced in"))
}

pub fn config_not_found() -> impl Predicate<str> {
    predicates::str::contains("No configuration found")
}
