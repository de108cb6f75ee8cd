//! Git repository management and setup utilities
//!
//! Creates working trees, bare remotes and dotfiles-style bare repositories
//! under one temporary directory, plus the configuration file that lists them.

#![allow(dead_code)]

use git_fleet::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A temporary directory holding every repository of one test.
/// The TempDir must be kept alive for the duration of the test.
pub struct TestFleet {
    pub temp_dir: TempDir,
}

impl TestFleet {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the configuration file written by [`TestFleet::write_config`]
    pub fn config_path(&self) -> PathBuf {
        self.root().join("config.yml")
    }

    pub fn write_config(&self, yaml: &str) -> Result<PathBuf> {
        let path = self.config_path();
        fs::write(&path, yaml)?;
        Ok(path)
    }

    /// Configuration listing working trees by literal path
    pub fn write_worktree_config(&self, repos: &[&Path]) -> Result<PathBuf> {
        let mut yaml = String::from("repo_paths:\n");
        for repo in repos {
            yaml.push_str(&format!("  - {}\n", repo.display()));
        }
        self.write_config(&yaml)
    }

    /// Fresh working tree on branch `main` with no commits
    pub fn init_repo(&self, name: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::create_dir_all(&path)?;
        git(&path, &["init", "--quiet"])?;
        configure(&path)?;
        Ok(path)
    }

    /// Working tree with one commit containing `initial.txt`
    pub fn init_repo_with_commit(&self, name: &str) -> Result<PathBuf> {
        let path = self.init_repo(name)?;
        create_file(&path, "initial.txt", "initial content\n")?;
        git_add(&path, "initial.txt")?;
        git_commit(&path, "Initial commit")?;
        Ok(path)
    }

    /// Bare repository acting as a remote
    pub fn init_remote(&self, name: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::create_dir_all(&path)?;
        git(&path, &["init", "--bare", "--quiet"])?;
        git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
        Ok(path)
    }

    /// Clone `remote` into a new working tree
    pub fn clone_remote(&self, remote: &Path, name: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        git(
            self.root(),
            &[
                "clone",
                "--quiet",
                &remote.display().to_string(),
                &path.display().to_string(),
            ],
        )?;
        configure(&path)?;
        Ok(path)
    }

    /// Dotfiles-style bare repository with a separate work tree.
    ///
    /// Returns `(git_dir, work_tree)`.
    pub fn init_dotfiles(&self, name: &str) -> Result<(PathBuf, PathBuf)> {
        let git_dir = self.root().join(format!("{name}.git"));
        let work_tree = self.root().join(format!("{name}-home"));
        fs::create_dir_all(&git_dir)?;
        fs::create_dir_all(&work_tree)?;
        git(&git_dir, &["init", "--bare", "--quiet"])?;
        git(&git_dir, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
        git(&git_dir, &["config", "status.showUntrackedFiles", "no"])?;
        configure(&git_dir)?;
        Ok((git_dir, work_tree))
    }
}

/// Run git in `dir`, failing the helper when git exits unsuccessfully
pub fn git(dir: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        ))
        .into());
    }
    Ok(output)
}

/// Run git against a bare repository with a separate work tree
pub fn git_bare(git_dir: &Path, work_tree: &Path, args: &[&str]) -> Result<Output> {
    let mut full = vec![
        format!("--git-dir={}", git_dir.display()),
        format!("--work-tree={}", work_tree.display()),
    ];
    full.extend(args.iter().map(|arg| arg.to_string()));
    let full: Vec<&str> = full.iter().map(String::as_str).collect();
    git(work_tree, &full)
}

/// Identity and branch settings that keep git from prompting
fn configure(path: &Path) -> Result<()> {
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;
    git(path, &["config", "pull.rebase", "false"])?;
    // symbolic-ref keeps the branch name independent of init.defaultBranch
    let _ = Command::new("git")
        .args(["symbolic-ref", "HEAD", "refs/heads/main"])
        .current_dir(path)
        .output()?;
    Ok(())
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename))?;
    Ok(())
}

/// Adds a file to the git index ("." for all files)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "--quiet", "-m", message])?;
    Ok(())
}

/// Current commit of `HEAD`
pub fn head_commit(repo_path: &Path) -> Result<String> {
    let output = git(repo_path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
