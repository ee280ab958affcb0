use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Outcome of a step that did not fail. A skip is still a success: the user
/// declined the step's work and the run moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Skipped,
}

#[async_trait]
pub trait Step: Send + Sync {
    async fn execute(&self, working_dir: &Path) -> Result<StepStatus>;
    fn name(&self) -> &str;
}
