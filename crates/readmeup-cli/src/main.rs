use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "readmeup", version, about = "Scheduled GitHub profile README updater")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch repository stats and rewrite the README
    Update {
        /// Run even outside the schedule window
        #[arg(long)]
        force: bool,
        /// Print the rendered README instead of writing files
        #[arg(long)]
        dry_run: bool,
        /// Settings file (default: .github/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Show the schedule window evaluation for the current instant
    Window {
        /// Settings file (default: .github/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Workflow file management
    Workflow {
        #[command(subcommand)]
        action: commands::workflow::WorkflowAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Update {
            force,
            dry_run,
            settings,
        } => commands::update::run(force, dry_run, settings),
        Commands::Window { settings } => commands::window::run(settings),
        Commands::Workflow { action } => commands::workflow::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
