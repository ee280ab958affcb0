use super::cache_step::CacheStep;
use super::choice_step::{Choice, ChoiceStep};
use super::command::CommandSpec;
use super::env_file_step::EnvFileStep;
use super::key_step::KeyStep;
use super::step::{Step, StepStatus};
use super::storage_link_step::StorageLinkStep;
use crate::chooser::Chooser;
use crate::error::StepFailure;
use crate::settings::Settings;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Where the public storage link lives, relative to the project directory
const STORAGE_LINK_PATH: &str = "public/storage";

/// Compiled files cleared before the caches are rebuilt
const CACHE_GLOB: &str = "bootstrap/cache/*.php";

/// Summary of a finished run. `completed + skipped` always equals `total`.
#[derive(Debug)]
pub struct RunReport {
    pub completed: usize,
    pub skipped: usize,
    pub total: usize,
}

/// An ordered list of setup steps bound to an explicit working directory.
/// Steps run strictly in order; the first failure aborts the rest.
pub struct SetupPlan {
    steps: Vec<Box<dyn Step>>,
    working_dir: PathBuf,
}

impl SetupPlan {
    /// The hardcoded setup sequence for a web application project.
    pub fn standard(
        settings: &Settings,
        working_dir: impl AsRef<Path>,
        chooser: Arc<dyn Chooser>,
    ) -> Self {
        let php = settings.php_binary.as_str();
        let npm = settings.npm_binary.as_str();

        let steps: Vec<Box<dyn Step>> = vec![
            Box::new(ChoiceStep::new(
                "Composer dependencies",
                "Install Composer dependencies?",
                vec![
                    Choice::skip("Skip"),
                    Choice::new(
                        "Install",
                        vec![CommandSpec::new(&settings.composer_binary, &["install"])],
                    ),
                ],
                0,
                chooser.clone(),
            )),
            Box::new(EnvFileStep::new(&settings.env_template, &settings.env_file)),
            Box::new(KeyStep::new(
                &settings.env_file,
                CommandSpec::new(php, &["artisan", "key:generate", "--ansi"]),
            )),
            Box::new(StorageLinkStep::new(
                STORAGE_LINK_PATH,
                CommandSpec::new(php, &["artisan", "storage:link"]),
            )),
            Box::new(ChoiceStep::new(
                "Database migrations",
                "Run database migrations?",
                vec![
                    Choice::skip("Skip"),
                    Choice::new(
                        "Migrate",
                        vec![CommandSpec::new(php, &["artisan", "migrate", "--force"])],
                    ),
                    Choice::new(
                        "Migrate and seed",
                        vec![CommandSpec::new(
                            php,
                            &["artisan", "migrate", "--seed", "--force"],
                        )],
                    ),
                ],
                0,
                chooser.clone(),
            )),
            Box::new(ChoiceStep::new(
                "Frontend assets",
                "Install and build frontend assets?",
                vec![
                    Choice::skip("Skip"),
                    Choice::new(
                        "Install and build",
                        vec![
                            CommandSpec::new(npm, &["install"]),
                            CommandSpec::new(npm, &["run", "build"]),
                        ],
                    ),
                ],
                0,
                chooser.clone(),
            )),
            Box::new(CacheStep::new(
                CACHE_GLOB,
                vec![
                    CommandSpec::new(php, &["artisan", "config:cache"]),
                    CommandSpec::new(php, &["artisan", "route:cache"]),
                    CommandSpec::new(php, &["artisan", "view:cache"]),
                ],
                chooser,
            )),
        ];

        Self::from_steps(steps, working_dir)
    }

    /// Build a plan from an arbitrary step list. Used by tests.
    pub fn from_steps(steps: Vec<Box<dyn Step>>, working_dir: impl AsRef<Path>) -> Self {
        Self {
            steps,
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Execute every step in declared order.
    ///
    /// Progress is reported after each completed or skipped step. The first
    /// failing step aborts the run; the caller decides the process exit code.
    pub async fn run(&self) -> Result<RunReport, StepFailure> {
        let total = self.steps.len();
        info!("Starting setup with {} steps", total);
        debug!("Working directory: {}", self.working_dir.display());

        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut completed = 0;
        let mut skipped = 0;

        for (i, step) in self.steps.iter().enumerate() {
            info!("Step {}/{}: {}", i + 1, total, step.name());

            match step.execute(&self.working_dir).await {
                Ok(StepStatus::Done) => {
                    completed += 1;
                    info!("Step {}/{} completed", i + 1, total);
                }
                Ok(StepStatus::Skipped) => {
                    skipped += 1;
                    info!("Step {}/{} skipped", i + 1, total);
                }
                Err(cause) => {
                    progress.abandon_with_message(format!("failed at {}", step.name()));
                    return Err(StepFailure {
                        index: i + 1,
                        total,
                        label: step.name().to_string(),
                        cause,
                    });
                }
            }

            progress.set_message(step.name().to_string());
            progress.inc(1);
        }

        progress.finish_with_message("setup complete");
        info!("Setup completed: {} done, {} skipped", completed, skipped);

        Ok(RunReport {
            completed,
            skipped,
            total,
        })
    }
}
