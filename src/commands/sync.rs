use super::{run, RunOptions};
use crate::core::{error::Result, orchestrator::SyncPlan};

/// Push bare repositories, pull everything, then report status
pub async fn execute_sync(options: &RunOptions) -> Result<()> {
    log::debug!("Syncing configured repositories");
    run(options, SyncPlan::Full).await
}
