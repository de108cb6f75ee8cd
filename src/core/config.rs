//! YAML configuration: which repositories to sync and how.
//!
//! ```yaml
//! repo_paths:
//!   - ~/Development/*
//!   - ~/wiki
//! bare_repos:
//!   - git_dir: ~/.dotfiles
//!     work_tree: ~
//!     name: dotfiles
//! settings:
//!   jobs: 8
//!   timeout_secs: 60
//! ```
//!
//! Glob patterns in `repo_paths` only keep directories that contain `.git`.
//! Literal paths are always kept, so a missing repository shows up as offline
//! instead of silently disappearing.

use crate::core::descriptor::RepositoryDescriptor;
use crate::core::dirs::{default_config_path, expand_tilde, home_config_path};
use crate::core::error::{FleetError, Result};
use crate::core::orchestrator::OrchestratorSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Working tree paths or glob patterns
    pub repo_paths: Vec<String>,
    pub bare_repos: Vec<BareRepoConfig>,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareRepoConfig {
    pub git_dir: String,
    pub work_tree: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of repositories synced at once
    pub jobs: Option<usize>,
    /// Limit for every single git invocation
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Find the configuration file to use.
    ///
    /// An explicit path must exist. Otherwise the default location is used,
    /// falling back to `~/.git-fleet.yml`.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return if path.is_file() {
                Ok(path.to_path_buf())
            } else {
                Err(FleetError::config_not_found(path))
            };
        }

        let default_path = default_config_path()?;
        if default_path.is_file() {
            return Ok(default_path);
        }
        if let Some(home_path) = home_config_path().filter(|p| p.is_file()) {
            return Ok(home_path);
        }
        Err(FleetError::config_not_found(default_path))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());

        let content =
            fs::read_to_string(path).map_err(|e| FleetError::config_read_failed(path, e))?;
        // An empty file is an empty configuration, not a YAML error
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&content).map_err(|e| FleetError::config_parse_failed(path, e))
    }

    /// Expand all configured entries into repository descriptors
    pub fn descriptors(&self) -> Result<Vec<RepositoryDescriptor>> {
        let mut repos = Vec::new();

        for pattern in &self.repo_paths {
            for path in expand_pattern(pattern)? {
                repos.push(RepositoryDescriptor::worktree(path));
            }
        }

        for bare in &self.bare_repos {
            repos.push(RepositoryDescriptor::bare(
                first_match(&bare.git_dir)?,
                first_match(&bare.work_tree)?,
                bare.name.clone(),
            ));
        }

        log::debug!("Configured {} repositories", repos.len());
        Ok(repos)
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            timeout: self.settings.timeout_secs.map(Duration::from_secs),
            max_concurrency: self.settings.jobs,
        }
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    let expanded = expand_tilde(pattern);
    let expanded = expanded.to_string_lossy();
    let paths = glob::glob(&expanded).map_err(|e| FleetError::invalid_path_pattern(pattern, e))?;

    Ok(paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Skipping unreadable path while expanding '{pattern}': {e}");
                None
            }
        })
        .collect())
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    if !is_glob(pattern) {
        return Ok(vec![expand_tilde(pattern)]);
    }

    let (repos, skipped): (Vec<_>, Vec<_>) = glob_paths(pattern)?
        .into_iter()
        .filter(|path| path.is_dir())
        .partition(|path| path.join(".git").exists());

    for path in skipped {
        log::debug!("Skipping {} (no .git directory)", path.display());
    }
    Ok(repos)
}

/// Bare entries name a single path; a glob uses its first match
fn first_match(pattern: &str) -> Result<PathBuf> {
    if !is_glob(pattern) {
        return Ok(expand_tilde(pattern));
    }
    glob_paths(pattern)?
        .into_iter()
        .next()
        .ok_or_else(|| FleetError::unmatched_bare_path(pattern))
}
