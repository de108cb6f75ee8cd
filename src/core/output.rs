//! Output formatting for the command line.
//!
//! Each repository renders as one header line followed by its indented changes:
//!
//! ```text
//! ✓ clean-repo main +0 -0 ~0
//! ⚠ busy-repo feature +2 -1 ~3
//!     modified: src/lib.rs
//!     renamed: new.rs <- old.rs
//!     untracked: notes.txt
//! ! dotfiles offline (not a git repository)
//! ```
//!
//! Bare repositories have no ahead/behind counts and omit them.

use crate::core::colors::{get_category_color_style, get_health_color_style, RepositoryHealth};
use crate::core::error::Result;
use crate::core::failure::GitFailure;
use crate::core::git_status::EntryCategory;
use crate::core::model::{BranchState, Head, Oid};
use crate::core::normalizer::RepositoryReport;
use crate::core::orchestrator::Step;
use colored::*;
use std::time::Duration;

const INDENT: &str = "    ";

/// Formats and prints an error message with consistent styling
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

fn header(report: &RepositoryReport) -> String {
    let status = &report.status;
    if !status.online {
        let reason = report
            .offline_reason()
            .map(|failure| format!(" ({failure})"))
            .unwrap_or_default();
        return format!("{} offline{reason}", status.name);
    }

    let changes = status.entries.len()
        + status.unmerged.len()
        + status.untracked.len()
        + status.ignored.len();
    match &status.branch {
        Some(BranchState::Tracking(info)) => format!(
            "{} {} +{} -{} ~{changes}",
            status.name,
            head_label(&info.oid, &info.head),
            info.ahead,
            info.behind
        ),
        Some(BranchState::HeadOnly(head_ref)) => format!(
            "{} {} ~{changes}",
            status.name,
            head_label(&head_ref.oid, &head_ref.head)
        ),
        None => format!("{} ~{changes}", status.name),
    }
}

/// Branch name, or the short commit when HEAD is detached
fn head_label(oid: &Oid, head: &Head) -> String {
    match head {
        Head::Branch(name) => name.clone(),
        Head::Detached => format!("{head} {}", oid.short()),
    }
}

fn entry_line(category: EntryCategory, text: &str) -> String {
    let color_fn = get_category_color_style(category);
    format!("{INDENT}{}", color_fn(&format!("{}: {text}", category.description())))
}

/// Render one repository as a block of lines
pub fn render_report(report: &RepositoryReport) -> String {
    let status = &report.status;
    let health = RepositoryHealth::of(status);
    let color_fn = get_health_color_style(health);

    let mut lines = vec![color_fn(&format!("{} {}", health.symbol(), header(report))).to_string()];

    for entry in status.entries.iter().chain(&status.unmerged) {
        let text = match &entry.original_path {
            Some(original) => format!("{} <- {original}", entry.path),
            None => entry.path.clone(),
        };
        let text = if entry.staged {
            format!("{text} (staged)")
        } else {
            text
        };
        lines.push(entry_line(entry.category, &text));
    }
    for path in &status.untracked {
        lines.push(entry_line(EntryCategory::Untracked, path));
    }
    for path in &status.ignored {
        lines.push(entry_line(EntryCategory::Ignored, path));
    }

    // offline repositories already name the reason in the header
    let repo_unreachable = report
        .offline_reason()
        .is_some_and(GitFailure::is_unreachable);
    for (step, failure) in &report.failures {
        if repo_unreachable || (!status.online && *step == Step::Status) {
            continue;
        }
        lines.push(format!(
            "{INDENT}{}",
            format!("{step} failed: {failure}").bright_black()
        ));
    }
    for error in &report.parse_errors {
        lines.push(format!(
            "{INDENT}{}",
            format!("unparsed status {error}").bright_black()
        ));
    }

    lines.join("\n")
}

pub fn render_json(reports: &[RepositoryReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

pub fn render_summary(count: usize, elapsed: Duration) -> String {
    format!(
        "{} repositories synced in {:.2} seconds.",
        count,
        elapsed.as_secs_f64()
    )
    .bright_black()
    .to_string()
}
