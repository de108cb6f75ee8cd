//! Turns raw [`SyncResult`]s into the records the renderers consume.
//!
//! # Public API
//! - [`normalize`]: Parsed [`RepositoryStatus`] for one result
//! - [`report`]: Status plus parse errors and classified step failures
//! - [`report_all`]: [`report`] over a whole run

use crate::core::failure::GitFailure;
use crate::core::model::{BranchState, RepositoryStatus};
use crate::core::orchestrator::{Step, SyncResult};
use crate::core::porcelain::{self, LineError};
use serde::Serialize;

/// Everything a renderer needs to know about one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryReport {
    pub status: RepositoryStatus,
    pub parse_errors: Vec<LineError>,
    pub failures: Vec<(Step, GitFailure)>,
}

impl RepositoryReport {
    pub fn name(&self) -> &str {
        &self.status.name
    }

    /// Reason the repository is offline, if git told us
    pub fn offline_reason(&self) -> Option<&GitFailure> {
        if self.status.online {
            return None;
        }
        self.failures
            .iter()
            .find(|(step, _)| *step == Step::Status)
            .map(|(_, failure)| failure)
    }
}

/// Parse the status step of `result` and attach the repository name.
///
/// Empty status output yields an offline status instead of an error.
pub fn normalize(result: &SyncResult) -> RepositoryStatus {
    parse_result(result).0
}

pub fn report(result: &SyncResult) -> RepositoryReport {
    let (status, parse_errors) = parse_result(result);
    let failures = result
        .steps()
        .into_iter()
        .filter_map(|(step, output)| output.failure().map(|failure| (step, failure)))
        .collect();

    RepositoryReport {
        status,
        parse_errors,
        failures,
    }
}

pub fn report_all(results: &[SyncResult]) -> Vec<RepositoryReport> {
    results.iter().map(report).collect()
}

fn parse_result(result: &SyncResult) -> (RepositoryStatus, Vec<LineError>) {
    let stdout = &result.status().stdout;
    if stdout.trim().is_empty() {
        return (RepositoryStatus::offline(result.name()), Vec::new());
    }

    let parsed = porcelain::parse(stdout);
    for error in &parsed.errors {
        log::warn!("{}: unparsed status {error}", result.name());
    }

    let mut status = parsed.status;
    status.name = result.name().to_string();
    if result.is_bare() {
        status.branch = status.branch.map(|branch| match branch {
            BranchState::Tracking(info) => BranchState::HeadOnly(info.head_ref()),
            head_only => head_only,
        });
    }

    (status, parsed.errors)
}
