use super::command::CommandSpec;
use super::step::{Step, StepStatus};
use crate::chooser::Chooser;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Warm the production caches.
///
/// Asks first (defaults to no, since a warmed cache is wrong for local
/// development), then removes stale compiled files matching `cache_glob`
/// before running the cache commands in order.
pub struct CacheStep {
    cache_glob: String,
    commands: Vec<CommandSpec>,
    chooser: Arc<dyn Chooser>,
}

impl CacheStep {
    pub fn new(cache_glob: &str, commands: Vec<CommandSpec>, chooser: Arc<dyn Chooser>) -> Self {
        Self {
            cache_glob: cache_glob.to_string(),
            commands,
            chooser,
        }
    }
}

#[async_trait]
impl Step for CacheStep {
    async fn execute(&self, working_dir: &Path) -> Result<StepStatus> {
        if !self.chooser.confirm("Warm the production caches?", false)? {
            info!("Cache warmup skipped");
            return Ok(StepStatus::Skipped);
        }

        // Stale compiled files would otherwise survive the rebuild
        let pattern = working_dir.join(&self.cache_glob);
        for entry in glob::glob(&pattern.to_string_lossy())? {
            let path = entry?;
            if path.is_file() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
                debug!("Removed stale {}", path.display());
            }
        }

        for command in &self.commands {
            command.run(working_dir).await?;
        }

        Ok(StepStatus::Done)
    }

    fn name(&self) -> &str {
        "Cache warmup"
    }
}
