//! git-fleet - keep many git repositories in sync from one command.
//!
//! Working-tree repositories are pulled, bare repositories (dotfiles style,
//! with a separate work tree) are pushed and pulled, and every repository is
//! then summarized from `git status --porcelain=2 -b`.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Configuration loading and repository descriptors
//! - The [`CommandRunner`] seam and the concurrent [`Orchestrator`]
//! - The porcelain v2 parser and status model
//! - Error handling and result types
//! - Text and JSON rendering

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Running git
    CommandOutput,
    CommandRunner,
    // Configuration
    Config,
    // Error handling
    FleetError,
    GitFailure,
    GitRunner,
    Orchestrator,
    OrchestratorSettings,
    RepositoryDescriptor,
    // Normalized output
    RepositoryReport,
    RepositoryStatus,
    Result,
    Step,
    StepOutput,
    SyncPlan,
    SyncResult,
};
