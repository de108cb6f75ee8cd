pub mod status;
pub mod sync;

pub use status::*;
pub use sync::*;

use crate::core::{
    config::Config,
    error::{FleetError, Result},
    normalizer::report_all,
    orchestrator::{Orchestrator, SyncPlan},
    output::{render_json, render_report, render_summary},
    runner::GitRunner,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Options shared by every command, usually straight from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub json: bool,
    /// Overrides `settings.jobs`
    pub jobs: Option<usize>,
    /// Overrides `settings.timeout_secs`
    pub timeout_secs: Option<u64>,
}

async fn run(options: &RunOptions, plan: SyncPlan) -> Result<()> {
    let path = Config::locate(options.config.as_deref())?;
    let config = Config::load_from_file(&path)?;

    let repos = config.descriptors()?;
    if repos.is_empty() {
        return Err(FleetError::no_repositories(&path));
    }

    let mut settings = config.orchestrator_settings();
    if let Some(jobs) = options.jobs {
        settings.max_concurrency = Some(jobs);
    }
    if let Some(secs) = options.timeout_secs {
        settings.timeout = Some(Duration::from_secs(secs));
    }

    let started = Instant::now();
    let orchestrator = Orchestrator::new(GitRunner::new(), settings);
    let results = orchestrator.run_all(&repos, plan).await;
    let reports = report_all(&results);

    let mut out = io::stdout().lock();
    if options.json {
        writeln!(out, "{}", render_json(&reports)?)?;
        return Ok(());
    }

    for report in &reports {
        writeln!(out, "{}", render_report(report))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", render_summary(reports.len(), started.elapsed()))?;
    Ok(())
}
