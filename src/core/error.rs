//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`FleetError`] which covers every failure that can stop a
//! git-fleet run as a whole. Per-repository problems (a git command failing, a
//! malformed status line) never become a `FleetError` on their own; they are
//! carried inside the per-repository results instead.
//!
//! # Public API
//! - [`FleetError`]: Main error enum covering all fatal failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, FleetError>`
//! - [`StatusParseError`]: Every line-level problem found in one status stream
//!
//! # Error Categories
//! - **Configuration**: Missing file, unreadable file, invalid YAML, bad globs
//! - **Process execution**: git could not be spawned at all
//! - **Status parsing**: Strict parsing of porcelain v2 output

use crate::core::porcelain::LineError;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-fleet
#[derive(Error, Debug)]
pub enum FleetError {
    // Configuration errors
    #[error("Could not determine the configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Configuration file does not exist: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid path pattern '{pattern}': {source}")]
    InvalidPathPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Bare repository entry '{pattern}' does not match any path")]
    UnmatchedBarePath { pattern: String },

    #[error("No repositories configured. Add 'repo_paths' or 'bare_repos' to {path}")]
    NoRepositories { path: PathBuf },

    // Process errors
    #[error("Failed to run '{program}': {source}")]
    CommandSpawn {
        program: String,
        source: std::io::Error,
    },

    // Status parsing errors
    #[error(transparent)]
    StatusParse(#[from] StatusParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using FleetError
pub type Result<T> = std::result::Result<T, FleetError>;

/// All malformed lines found while parsing one porcelain v2 stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} malformed status line(s); first: {}", errors.len(), first_error(errors))]
pub struct StatusParseError {
    pub errors: Vec<LineError>,
}

fn first_error(errors: &[LineError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl FleetError {
    /// Create a configuration not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create a configuration read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid path pattern error
    pub fn invalid_path_pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::InvalidPathPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an unmatched bare path error
    pub fn unmatched_bare_path(pattern: impl Into<String>) -> Self {
        Self::UnmatchedBarePath {
            pattern: pattern.into(),
        }
    }

    /// Create a no repositories error for the given configuration file
    pub fn no_repositories(path: impl Into<PathBuf>) -> Self {
        Self::NoRepositories { path: path.into() }
    }

    /// Create a command spawn error
    pub fn command_spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            program: program.into(),
            source,
        }
    }
}
