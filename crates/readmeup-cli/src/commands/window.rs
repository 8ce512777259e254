use std::path::PathBuf;

use readmeup_core::{Clock, LastRunRecord, SystemClock};

use super::load_settings;

pub fn run(settings_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(settings_path)?;
    let window = settings.run_window()?;
    let last_run = LastRunRecord::load(&settings.last_run_path)?;

    let evaluation = window.evaluate(
        SystemClock.now(),
        last_run.map(|r| r.timestamp),
        false,
    );
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}
