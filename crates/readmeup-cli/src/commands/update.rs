use std::path::PathBuf;

use readmeup_core::{run_update, GitHubClient, SystemClock, UpdateOptions, UpdateOutcome};

use super::load_settings;

pub fn run(
    force: bool,
    dry_run: bool,
    settings_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(settings_path)?;
    let client = GitHubClient::new();
    let options = UpdateOptions { force, dry_run };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(run_update(&settings, &client, &SystemClock, options))?;

    let tz = settings.parse_timezone()?;
    match outcome {
        UpdateOutcome::Skipped { next_run } => match next_run {
            Some(next) => println!(
                "outside the update window; next eligible run: {}",
                next.with_timezone(&tz).format("%d/%m/%Y %H:%M")
            ),
            None => println!("outside the update window; no hours configured"),
        },
        UpdateOutcome::Completed {
            total_projects,
            rendered,
            ..
        } => {
            if dry_run {
                print!("{rendered}");
            } else {
                println!(
                    "README updated ({total_projects} projects) at {}",
                    settings.readme_path.display()
                );
            }
        }
    }
    Ok(())
}
