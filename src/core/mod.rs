//! Core functionality for git-fleet.
//!
//! Configuration and repository descriptors, the git command runner, the
//! concurrent orchestrator, the porcelain v2 parser and the renderers.

pub mod colors;
pub mod config;
pub mod descriptor;
pub mod dirs;
pub mod error;
pub mod failure;
pub mod git_status;
pub mod model;
pub mod normalizer;
pub mod orchestrator;
pub mod output;
pub mod porcelain;
pub mod runner;

// === Error handling ===
pub use error::{FleetError, Result, StatusParseError};

// === Configuration ===
pub use config::{BareRepoConfig, Config, Settings};
pub use descriptor::RepositoryDescriptor;

// === Running git ===
// Runner seam plus the orchestrator that fans out over repositories
pub use failure::GitFailure;
pub use orchestrator::{
    Orchestrator, OrchestratorSettings, Step, StepOutput, SyncPlan, SyncResult,
};
pub use runner::{CommandOutput, CommandRunner, GitRunner};

// === Status model ===
pub use git_status::{EntryCategory, StatusCode};
pub use model::{
    BranchInfo, BranchState, ChangedEntry, Head, HeadRef, Oid, RepositoryStatus,
};
pub use porcelain::{parse, LineError, LineErrorKind, ParsedStatus};

// === Normalization ===
pub use normalizer::{normalize, report, report_all, RepositoryReport};

// === Output formatting ===
pub use colors::{get_category_color_style, get_health_color_style, RepositoryHealth};
pub use output::{print_error, render_json, render_report, render_summary};
