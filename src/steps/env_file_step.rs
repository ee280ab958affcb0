use super::step::{Step, StepStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Provision the live environment file from its template.
///
/// The copy only happens when the target is absent; an existing file is left
/// untouched so re-running setup never clobbers local configuration.
pub struct EnvFileStep {
    template: PathBuf,
    target: PathBuf,
}

impl EnvFileStep {
    pub fn new(template: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            target: target.into(),
        }
    }
}

#[async_trait]
impl Step for EnvFileStep {
    async fn execute(&self, working_dir: &Path) -> Result<StepStatus> {
        let target = working_dir.join(&self.target);

        if target.exists() {
            info!("{} already exists, leaving it untouched", self.target.display());
            return Ok(StepStatus::Done);
        }

        let template = working_dir.join(&self.template);
        std::fs::copy(&template, &target).with_context(|| {
            format!(
                "failed to copy {} to {}",
                template.display(),
                target.display()
            )
        })?;

        info!(
            "Created {} from {}",
            self.target.display(),
            self.template.display()
        );
        Ok(StepStatus::Done)
    }

    fn name(&self) -> &str {
        "Environment file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_copies_template_when_target_absent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env.example"), "APP_ENV=local\nAPP_KEY=\n").unwrap();

        let step = EnvFileStep::new(".env.example", ".env");
        let status = step.execute(dir.path()).await.unwrap();

        assert_eq!(status, StepStatus::Done);
        let copied = fs::read_to_string(dir.path().join(".env")).unwrap();
        assert_eq!(copied, "APP_ENV=local\nAPP_KEY=\n");
    }

    #[tokio::test]
    async fn test_existing_target_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env.example"), "APP_ENV=local\n").unwrap();
        fs::write(dir.path().join(".env"), "APP_ENV=staging\nAPP_KEY=secret\n").unwrap();

        let step = EnvFileStep::new(".env.example", ".env");
        let status = step.execute(dir.path()).await.unwrap();

        assert_eq!(status, StepStatus::Done);
        let existing = fs::read_to_string(dir.path().join(".env")).unwrap();
        assert_eq!(existing, "APP_ENV=staging\nAPP_KEY=secret\n");
    }

    #[tokio::test]
    async fn test_missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let step = EnvFileStep::new(".env.example", ".env");
        let result = step.execute(dir.path()).await;

        assert!(result.is_err());
        assert!(!dir.path().join(".env").exists());
    }
}
