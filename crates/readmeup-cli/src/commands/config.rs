use std::path::PathBuf;

use clap::Subcommand;
use readmeup_core::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "timezone", "update_hours")
        key: String,
        /// Settings file (default: .github/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value (arrays as JSON, e.g. "[8,12,16,20]")
        value: String,
        /// Settings file (default: .github/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// List all settings values
    List {
        /// Settings file (default: .github/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Reset settings to defaults
    Reset {
        /// Settings file (default: .github/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn settings_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(Settings::default_path)
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key, settings } => {
            let config = Settings::load(&settings_path(settings))?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set {
            key,
            value,
            settings,
        } => {
            let path = settings_path(settings);
            let mut config = Settings::load(&path)?;
            config.set(&key, &value)?;
            config.validate()?;
            config.save(&path)?;
            println!("ok");
        }
        ConfigAction::List { settings } => {
            let config = Settings::load(&settings_path(settings))?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset { settings } => {
            let path = settings_path(settings);
            Settings::default().save(&path)?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
