use std::path::PathBuf;

use clap::Subcommand;
use readmeup_core::workflow;

use super::load_settings;

#[derive(Subcommand)]
pub enum WorkflowAction {
    /// Write the scheduled workflow file from the configured cron
    Generate {
        /// Settings file (default: .github/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Output path (default: .github/workflows/update-readme.yml)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the workflow YAML without writing it
    Show {
        /// Settings file (default: .github/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

pub fn run(action: WorkflowAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WorkflowAction::Generate { settings, output } => {
            let settings = load_settings(settings)?;
            let path =
                output.unwrap_or_else(|| PathBuf::from(workflow::DEFAULT_WORKFLOW_PATH));
            workflow::write_workflow(&path, &settings.cron)?;
            println!("workflow written to {} (cron: {})", path.display(), settings.cron);
        }
        WorkflowAction::Show { settings } => {
            let settings = load_settings(settings)?;
            print!("{}", workflow::render_workflow(&settings.cron)?);
        }
    }
    Ok(())
}
