use anyhow::Result;
use clap::Parser;
use groundwork::chooser::{Chooser, DefaultChooser, TermChooser};
use groundwork::environment;
use groundwork::settings::Settings;
use groundwork::steps::SetupPlan;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "groundwork",
    about = "Interactive setup runner for web application projects",
    version
)]
struct Args {
    /// Project directory to set up
    #[arg(value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Answer every prompt with its default instead of asking
    #[arg(long)]
    no_interaction: bool,

    #[command(flatten)]
    settings: Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose {
        "groundwork=debug,info"
    } else {
        "groundwork=info"
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Setting up project in {}", args.dir.display());

    let mut settings = args.settings;
    if let Some(yaml_settings) = Settings::load_project_file(&args.dir)? {
        tracing::debug!("Merging settings from project file");
        settings.merge_with_yaml(&yaml_settings);
    }
    tracing::debug!("Effective settings: {:#?}", settings);

    // A production-like env file aborts the run before any step mutates state
    let env_file = args.dir.join(&settings.env_file);
    if environment::is_production(&env_file)? {
        tracing::error!(
            "APP_ENV in {} is set to a production value; refusing to run setup here",
            env_file.display()
        );
        std::process::exit(1);
    }

    let chooser: Arc<dyn Chooser> = if args.no_interaction {
        Arc::new(DefaultChooser)
    } else {
        Arc::new(TermChooser)
    };

    let plan = SetupPlan::standard(&settings, &args.dir, chooser);
    match plan.run().await {
        Ok(report) => {
            tracing::info!(
                "Setup finished: {}/{} steps done, {} skipped",
                report.completed,
                report.total,
                report.skipped
            );
            Ok(())
        }
        Err(failure) => {
            tracing::error!("{}", failure);
            std::process::exit(1);
        }
    }
}
