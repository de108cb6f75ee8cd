//! Predefined repository scenarios
//!
//! Each scenario builds its repositories inside a [`TestFleet`] so a single
//! configuration file can list all of them.

#![allow(dead_code)]

use super::repository::*;
use git_fleet::core::error::Result;
use std::path::PathBuf;

/// Scenario: one modified file, one staged rename and one untracked file
pub fn create_dirty_repo(fleet: &TestFleet, name: &str) -> Result<PathBuf> {
    let repo = fleet.init_repo(name)?;
    create_file(&repo, "tracked.txt", "tracked\n")?;
    create_file(&repo, "old.txt", "rename me\n")?;
    git_add(&repo, ".")?;
    git_commit(&repo, "Initial commit")?;

    create_file(&repo, "tracked.txt", "tracked\nchanged\n")?;
    git(&repo, &["mv", "old.txt", "new.txt"])?;
    create_file(&repo, "notes.txt", "scratch\n")?;
    Ok(repo)
}

/// Scenario: a working tree one commit behind its remote.
///
/// Returns `(remote, behind_clone)`.
pub fn create_behind_clone(fleet: &TestFleet) -> Result<(PathBuf, PathBuf)> {
    let remote = fleet.init_remote("origin.git")?;

    let seed = fleet.clone_remote(&remote, "seed")?;
    create_file(&seed, "README.md", "# project\n")?;
    git_add(&seed, "README.md")?;
    git_commit(&seed, "Initial commit")?;
    git(&seed, &["push", "--quiet", "-u", "origin", "main"])?;

    let work = fleet.clone_remote(&remote, "work")?;

    create_file(&seed, "CHANGELOG.md", "## 0.1.0\n")?;
    git_add(&seed, "CHANGELOG.md")?;
    git_commit(&seed, "Add changelog")?;
    git(&seed, &["push", "--quiet"])?;

    Ok((remote, work))
}

/// Scenario: dotfiles-style bare repository one commit ahead of its remote.
///
/// Returns `(remote, git_dir, work_tree)`.
pub fn create_dotfiles_ahead(fleet: &TestFleet) -> Result<(PathBuf, PathBuf, PathBuf)> {
    let remote = fleet.init_remote("dots-remote.git")?;
    let (git_dir, work_tree) = fleet.init_dotfiles("dots")?;

    git_bare(&git_dir, &work_tree, &["remote", "add", "origin", &remote.display().to_string()])?;

    create_file(&work_tree, ".bashrc", "export EDITOR=vi\n")?;
    git_bare(&git_dir, &work_tree, &["add", ".bashrc"])?;
    git_bare(&git_dir, &work_tree, &["commit", "--quiet", "-m", "Add bashrc"])?;
    git_bare(&git_dir, &work_tree, &["push", "--quiet", "-u", "origin", "main"])?;

    create_file(&work_tree, ".bashrc", "export EDITOR=vim\n")?;
    git_bare(&git_dir, &work_tree, &["commit", "--quiet", "-am", "Switch editor"])?;

    Ok((remote, git_dir, work_tree))
}
