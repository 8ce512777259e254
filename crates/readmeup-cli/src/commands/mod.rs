pub mod config;
pub mod update;
pub mod window;
pub mod workflow;

use std::path::PathBuf;

use readmeup_core::Settings;

/// Load and validate the settings, using the default path when none is
/// given.
pub fn load_settings(path: Option<PathBuf>) -> Result<Settings, Box<dyn std::error::Error>> {
    let path = path.unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&path)?;
    settings.validate()?;
    Ok(settings)
}
