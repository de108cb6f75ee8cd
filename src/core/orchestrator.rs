//! Concurrent push/pull/status across many repositories.
//!
//! The [`Orchestrator`] spawns one tokio task per [`RepositoryDescriptor`] and
//! runs that repository's command chain sequentially inside it:
//!
//! 1. `push` (bare repositories only, they have no ahead/behind telemetry)
//! 2. `pull`
//! 3. `status --porcelain=2 -b`
//!
//! Every step is attempted regardless of how the previous one went, and a
//! failing repository never affects its siblings. Results come back in input
//! order.
//!
//! # Public API
//! - [`Orchestrator`]: Drives a [`CommandRunner`] over many repositories
//! - [`OrchestratorSettings`]: Per-invocation timeout and concurrency cap
//! - [`SyncPlan`]: Full chain or status only
//! - [`SyncResult`] / [`StepOutput`]: Per-repository raw outcome

use crate::core::descriptor::RepositoryDescriptor;
use crate::core::error::FleetError;
use crate::core::failure::GitFailure;
use crate::core::runner::{CommandOutput, CommandRunner};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// One git operation of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Push,
    Pull,
    Status,
}

impl Step {
    /// git arguments for this step, after the repository selection
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Step::Push => &["push"],
            Step::Pull => &["pull"],
            Step::Status => &["status", "--porcelain=2", "-b"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Push => "push",
            Step::Pull => "pull",
            Step::Status => "status",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw outcome of one attempted step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

impl StepOutput {
    pub fn spawn_failed(error: &FleetError) -> Self {
        Self {
            stderr: error.to_string(),
            ..Default::default()
        }
    }

    pub fn timed_out(limit: Duration) -> Self {
        Self {
            stderr: format!("git timed out after {}s", limit.as_secs_f32()),
            timed_out: true,
            ..Default::default()
        }
    }

    pub fn failed(&self) -> bool {
        self.timed_out || self.exit_code != Some(0)
    }

    /// Why the step failed, `None` when it succeeded
    pub fn failure(&self) -> Option<GitFailure> {
        if self.timed_out {
            Some(GitFailure::TimedOut)
        } else if self.failed() {
            Some(GitFailure::classify(&self.stderr))
        } else {
            None
        }
    }
}

impl From<CommandOutput> for StepOutput {
    fn from(output: CommandOutput) -> Self {
        Self {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
            timed_out: false,
        }
    }
}

/// Per-repository outcome; steps that were not attempted are `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncResult {
    Worktree {
        name: String,
        pull: Option<StepOutput>,
        status: StepOutput,
    },
    Bare {
        name: String,
        push: Option<StepOutput>,
        pull: Option<StepOutput>,
        status: StepOutput,
    },
}

impl SyncResult {
    pub fn name(&self) -> &str {
        match self {
            SyncResult::Worktree { name, .. } | SyncResult::Bare { name, .. } => name,
        }
    }

    pub fn is_bare(&self) -> bool {
        matches!(self, SyncResult::Bare { .. })
    }

    pub fn push(&self) -> Option<&StepOutput> {
        match self {
            SyncResult::Worktree { .. } => None,
            SyncResult::Bare { push, .. } => push.as_ref(),
        }
    }

    pub fn pull(&self) -> Option<&StepOutput> {
        match self {
            SyncResult::Worktree { pull, .. } | SyncResult::Bare { pull, .. } => pull.as_ref(),
        }
    }

    pub fn status(&self) -> &StepOutput {
        match self {
            SyncResult::Worktree { status, .. } | SyncResult::Bare { status, .. } => status,
        }
    }

    /// Every attempted step in execution order
    pub fn steps(&self) -> Vec<(Step, &StepOutput)> {
        let mut steps = Vec::with_capacity(3);
        if let Some(push) = self.push() {
            steps.push((Step::Push, push));
        }
        if let Some(pull) = self.pull() {
            steps.push((Step::Pull, pull));
        }
        steps.push((Step::Status, self.status()));
        steps
    }

    /// Result for a repository whose task died before reporting back.
    ///
    /// Every step of `plan` is recorded as failed with the abort reason.
    fn aborted(repo: &RepositoryDescriptor, plan: SyncPlan, reason: &str) -> Self {
        let failed = StepOutput {
            stderr: format!("sync task aborted: {reason}"),
            ..Default::default()
        };
        let planned = (plan == SyncPlan::Full).then(|| failed.clone());
        match repo {
            RepositoryDescriptor::Worktree { .. } => SyncResult::Worktree {
                name: repo.name(),
                pull: planned,
                status: failed,
            },
            RepositoryDescriptor::Bare { .. } => SyncResult::Bare {
                name: repo.name(),
                push: planned.clone(),
                pull: planned,
                status: failed,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPlan {
    /// push (bare only), pull, status
    #[default]
    Full,
    StatusOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrchestratorSettings {
    /// Limit for each single git invocation
    pub timeout: Option<Duration>,
    /// Maximum number of repositories processed at once, unbounded when `None`
    pub max_concurrency: Option<usize>,
}

pub struct Orchestrator<R> {
    runner: Arc<R>,
    settings: OrchestratorSettings,
}

impl<R: CommandRunner + 'static> Orchestrator<R> {
    pub fn new(runner: R, settings: OrchestratorSettings) -> Self {
        Self {
            runner: Arc::new(runner),
            settings,
        }
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `plan` against every repository concurrently.
    ///
    /// Returns exactly one result per descriptor, in input order.
    pub async fn run_all(&self, repos: &[RepositoryDescriptor], plan: SyncPlan) -> Vec<SyncResult> {
        let limiter = self
            .settings
            .max_concurrency
            .map(|jobs| Arc::new(Semaphore::new(jobs.max(1))));
        let timeout = self.settings.timeout;

        log::debug!(
            "Syncing {} repositories ({:?}, jobs: {:?}, timeout: {:?})",
            repos.len(),
            plan,
            self.settings.max_concurrency,
            timeout
        );

        let handles: Vec<_> = repos
            .iter()
            .cloned()
            .map(|repo| {
                let runner = Arc::clone(&self.runner);
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    let _permit = match limiter {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };
                    run_chain(runner.as_ref(), &repo, plan, timeout).await
                })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .zip(repos)
            .map(|(joined, repo)| match joined {
                Ok(result) => result,
                Err(e) => {
                    log::error!("{}: sync task failed: {e}", repo.name());
                    SyncResult::aborted(repo, plan, &e.to_string())
                }
            })
            .collect()
    }
}

async fn run_chain<R: CommandRunner + ?Sized>(
    runner: &R,
    repo: &RepositoryDescriptor,
    plan: SyncPlan,
    timeout: Option<Duration>,
) -> SyncResult {
    let name = repo.name();
    let full = plan == SyncPlan::Full;

    let push = if full && repo.is_bare() {
        Some(run_step(runner, repo, Step::Push, timeout).await)
    } else {
        None
    };
    let pull = if full {
        Some(run_step(runner, repo, Step::Pull, timeout).await)
    } else {
        None
    };
    let status = run_step(runner, repo, Step::Status, timeout).await;

    match repo {
        RepositoryDescriptor::Worktree { .. } => SyncResult::Worktree { name, pull, status },
        RepositoryDescriptor::Bare { .. } => SyncResult::Bare {
            name,
            push,
            pull,
            status,
        },
    }
}

async fn run_step<R: CommandRunner + ?Sized>(
    runner: &R,
    repo: &RepositoryDescriptor,
    step: Step,
    timeout: Option<Duration>,
) -> StepOutput {
    let invocation = runner.run(repo, step.args());
    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, invocation).await {
            Ok(outcome) => outcome,
            Err(_) => {
                log::warn!("{}: git {step} timed out after {limit:?}", repo.name());
                return StepOutput::timed_out(limit);
            }
        },
        None => invocation.await,
    };

    match outcome {
        Ok(output) => {
            if !output.success() {
                log::warn!(
                    "{}: git {step} exited with {:?}: {}",
                    repo.name(),
                    output.exit_code,
                    output.stderr.trim()
                );
            }
            StepOutput::from(output)
        }
        Err(e) => {
            log::warn!("{}: git {step} could not run: {e}", repo.name());
            StepOutput::spawn_failed(&e)
        }
    }
}
