use super::command::CommandSpec;
use super::step::{Step, StepStatus};
use crate::environment;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Generate the application key when the env file does not carry one.
///
/// A non-empty `APP_KEY` in the env file makes this a no-op, so re-running
/// setup never rotates an existing key.
pub struct KeyStep {
    env_file: PathBuf,
    command: CommandSpec,
}

impl KeyStep {
    pub fn new(env_file: impl Into<PathBuf>, command: CommandSpec) -> Self {
        Self {
            env_file: env_file.into(),
            command,
        }
    }
}

#[async_trait]
impl Step for KeyStep {
    async fn execute(&self, working_dir: &Path) -> Result<StepStatus> {
        let env_path = working_dir.join(&self.env_file);

        if environment::has_app_key(&env_path)? {
            info!("Application key already set in {}", self.env_file.display());
            return Ok(StepStatus::Done);
        }

        self.command.run(working_dir).await?;
        Ok(StepStatus::Done)
    }

    fn name(&self) -> &str {
        "Application key"
    }
}
