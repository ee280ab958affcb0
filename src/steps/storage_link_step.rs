use super::command::CommandSpec;
use super::step::{Step, StepStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Recreate the public storage link: drop whatever currently occupies the
/// link path, then let the application CLI create a fresh one.
pub struct StorageLinkStep {
    link_path: PathBuf,
    command: CommandSpec,
}

impl StorageLinkStep {
    pub fn new(link_path: impl Into<PathBuf>, command: CommandSpec) -> Self {
        Self {
            link_path: link_path.into(),
            command,
        }
    }
}

#[async_trait]
impl Step for StorageLinkStep {
    async fn execute(&self, working_dir: &Path) -> Result<StepStatus> {
        let link = working_dir.join(&self.link_path);

        // symlink_metadata so a dangling link is still seen and removed
        match std::fs::symlink_metadata(&link) {
            Ok(metadata) => {
                if metadata.is_dir() {
                    std::fs::remove_dir_all(&link)
                        .with_context(|| format!("failed to remove {}", link.display()))?;
                } else {
                    std::fs::remove_file(&link)
                        .with_context(|| format!("failed to remove {}", link.display()))?;
                }
                info!("Removed existing {}", self.link_path.display());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No existing link at {}", link.display());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to inspect {}", link.display()));
            }
        }

        self.command.run(working_dir).await?;
        Ok(StepStatus::Done)
    }

    fn name(&self) -> &str {
        "Storage link"
    }
}
