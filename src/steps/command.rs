use crate::error::CommandError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// A single external command invocation: program name plus arguments.
///
/// The program is looked up on the parent's search path; tests and unusual
/// installs can pass an absolute path instead.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The command line as shown to the user.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Run the command in `working_dir` with inherited standard streams and
    /// wait for it to exit. The child's own output goes straight to the
    /// user's terminal; nothing is captured.
    pub async fn run(&self, working_dir: &Path) -> Result<(), CommandError> {
        info!("Running: {}", self.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| CommandError::Spawn {
                command: self.display(),
                source,
            })?;

        if !status.success() {
            return Err(CommandError::Failed {
                command: self.display(),
                status,
            });
        }

        debug!("`{}` completed successfully", self.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_args() {
        let spec = CommandSpec::new("composer", &[]);
        assert_eq!(spec.display(), "composer");
    }

    #[test]
    fn test_display_with_args() {
        let spec = CommandSpec::new("php", &["artisan", "storage:link"]);
        assert_eq!(spec.display(), "php artisan storage:link");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_zero_exit_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("true", &[]);
        assert!(spec.run(dir.path()).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_nonzero_exit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("false", &[]);
        match spec.run(dir.path()).await {
            Err(CommandError::Failed { command, status }) => {
                assert_eq!(command, "false");
                assert_eq!(status.code(), Some(1));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_missing_executable_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("groundwork-test-no-such-binary", &["--help"]);
        match spec.run(dir.path()).await {
            Err(CommandError::Spawn { command, .. }) => {
                assert!(command.starts_with("groundwork-test-no-such-binary"));
            }
            other => panic!("expected Spawn, got {:?}", other),
        }
    }
}
