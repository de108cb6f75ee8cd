use super::{run, RunOptions};
use crate::core::{error::Result, orchestrator::SyncPlan};

/// Report status without touching any remote
pub async fn execute_status(options: &RunOptions) -> Result<()> {
    run(options, SyncPlan::StatusOnly).await
}
