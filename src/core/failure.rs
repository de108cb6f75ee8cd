//! Classification of failed git invocations.
//!
//! git has no structured error channel, so the reason a command failed can only
//! be recovered from the text it wrote to stderr. The substrings matched here
//! are git's literal messages:
//!
//! | Substring                                  | Failure                  |
//! |--------------------------------------------|--------------------------|
//! | `not a git repository`                     | [`GitFailure::NotARepository`] |
//! | `cannot change to`                         | [`GitFailure::MissingPath`] |
//! | `no tracking information`                  | [`GitFailure::NoUpstream`] |
//! | `has no upstream branch`                   | [`GitFailure::NoUpstream`] |
//! | `No configured push destination`           | [`GitFailure::NoRemote`] |
//! | `No remote repository specified`           | [`GitFailure::NoRemote`] |
//! | `Could not read from remote repository`    | [`GitFailure::RemoteUnreachable`] |
//! | `Could not resolve host`                   | [`GitFailure::RemoteUnreachable`] |
//! | `Authentication failed`                    | [`GitFailure::AuthenticationFailed`] |
//! | `Permission denied`                        | [`GitFailure::AuthenticationFailed`] |
//! | `Not possible to fast-forward`             | [`GitFailure::Diverged`] |
//! | `divergent branches`                       | [`GitFailure::Diverged`] |
//! | `[rejected]`                               | [`GitFailure::Diverged`] |
//!
//! Anything else becomes [`GitFailure::Unrecognized`] carrying the first
//! non-empty stderr line.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GitFailure {
    NotARepository,
    MissingPath,
    NoUpstream,
    NoRemote,
    RemoteUnreachable,
    AuthenticationFailed,
    Diverged,
    TimedOut,
    Unrecognized(String),
}

// Order matters: "Permission denied" also shows up next to
// "Could not read from remote repository", and the latter is more useful.
const PATTERNS: &[(&str, GitFailure)] = &[
    ("not a git repository", GitFailure::NotARepository),
    ("cannot change to", GitFailure::MissingPath),
    ("no tracking information", GitFailure::NoUpstream),
    ("has no upstream branch", GitFailure::NoUpstream),
    ("No configured push destination", GitFailure::NoRemote),
    ("No remote repository specified", GitFailure::NoRemote),
    ("Authentication failed", GitFailure::AuthenticationFailed),
    ("Could not read from remote repository", GitFailure::RemoteUnreachable),
    ("Could not resolve host", GitFailure::RemoteUnreachable),
    ("Permission denied", GitFailure::AuthenticationFailed),
    ("Not possible to fast-forward", GitFailure::Diverged),
    ("divergent branches", GitFailure::Diverged),
    ("[rejected]", GitFailure::Diverged),
];

impl GitFailure {
    /// Classify stderr of a command that is already known to have failed
    pub fn classify(stderr: &str) -> GitFailure {
        for (needle, failure) in PATTERNS {
            if stderr.contains(needle) {
                return failure.clone();
            }
        }

        let first_line = stderr
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("unknown error");
        GitFailure::Unrecognized(first_line.to_string())
    }

    /// Whether the repository itself could not be reached
    pub fn is_unreachable(&self) -> bool {
        matches!(self, GitFailure::NotARepository | GitFailure::MissingPath)
    }

    pub fn description(&self) -> &str {
        match self {
            GitFailure::NotARepository => "not a git repository",
            GitFailure::MissingPath => "path does not exist",
            GitFailure::NoUpstream => "no upstream branch",
            GitFailure::NoRemote => "no remote configured",
            GitFailure::RemoteUnreachable => "remote unreachable",
            GitFailure::AuthenticationFailed => "authentication failed",
            GitFailure::Diverged => "diverged from remote",
            GitFailure::TimedOut => "timed out",
            GitFailure::Unrecognized(line) => line,
        }
    }
}

impl fmt::Display for GitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
