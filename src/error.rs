use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Failure of a single external command invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The executable could not be started at all (not found, not executable).
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but did not exit with code zero.
    #[error("`{command}` failed ({status})")]
    Failed { command: String, status: ExitStatus },
}

/// The first failing step of a run, with enough context for the driver to
/// report it and pick the process exit code.
#[derive(Debug, Error)]
#[error("step {index}/{total} ({label}) failed: {cause:#}")]
pub struct StepFailure {
    /// 1-based position of the failing step in the plan.
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub cause: anyhow::Error,
}
