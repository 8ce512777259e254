//! JSON-based run settings.
//!
//! Stored at `.github/settings.json` in the target repository:
//! - GitHub user whose repositories are counted
//! - Timezone and allowed update hours for the schedule window
//! - Grace tolerance and workflow cron expression
//! - Paths for the README, template and last-run record
//!
//! Settings are loaded once per invocation and passed down explicitly;
//! there is no process-wide singleton.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::window::RunWindow;
use crate::workflow;

/// Run settings.
///
/// Serialized to/from JSON at [`Settings::default_path`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// GitHub login whose repositories feed the statistics.
    #[serde(default)]
    pub github_user: String,
    /// IANA timezone the schedule window evaluates in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Allowed hours-of-day (0-23) for automatic updates.
    #[serde(default = "default_update_hours")]
    pub update_hours: Vec<u32>,
    /// Minutes after a slot's nominal time during which a late run is
    /// still credited to that slot.
    #[serde(default)]
    pub grace_minutes: u32,
    /// Cron expression for the generated workflow trigger.
    #[serde(default = "default_cron")]
    pub cron: String,
    #[serde(default = "default_readme_path")]
    pub readme_path: PathBuf,
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
    #[serde(default = "default_last_run_path")]
    pub last_run_path: PathBuf,
}

fn default_timezone() -> String {
    "America/Sao_Paulo".into()
}
fn default_update_hours() -> Vec<u32> {
    vec![8, 12, 16, 20]
}
fn default_cron() -> String {
    "*/15 * * * *".into()
}
fn default_readme_path() -> PathBuf {
    "README.md".into()
}
fn default_template_path() -> PathBuf {
    "templates/README.template.md".into()
}
fn default_last_run_path() -> PathBuf {
    ".last-run.json".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_user: String::new(),
            timezone: default_timezone(),
            update_hours: default_update_hours(),
            grace_minutes: 0,
            cron: default_cron(),
            readme_path: default_readme_path(),
            template_path: default_template_path(),
            last_run_path: default_last_run_path(),
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        Path::new(".github").join("settings.json")
    }

    /// Load from disk, writing (and returning) the defaults when the file
    /// does not exist yet.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save(path)?;
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let save_err = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| save_err(e.to_string()))?;
            }
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| save_err(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_err(e.to_string()))?;
        Ok(())
    }

    /// Reject malformed settings before anything downstream sees them:
    /// the window evaluator is total and assumes hours are already valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(&bad) = self.update_hours.iter().find(|h| **h > 23) {
            return Err(ConfigError::InvalidValue {
                key: "update_hours".into(),
                message: format!("hour {bad} is outside 0-23"),
            });
        }
        let mut seen = self.update_hours.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != self.update_hours.len() {
            return Err(ConfigError::InvalidValue {
                key: "update_hours".into(),
                message: "hours must be unique".into(),
            });
        }
        self.parse_timezone()?;
        workflow::validate_cron(&self.cron)?;
        Ok(())
    }

    pub fn parse_timezone(&self) -> Result<chrono_tz::Tz, ConfigError> {
        chrono_tz::Tz::from_str(&self.timezone)
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }

    /// The schedule window these settings describe.
    pub fn run_window(&self) -> Result<RunWindow, ConfigError> {
        let tz = self.parse_timezone()?;
        Ok(RunWindow::new(tz, self.update_hours.iter().copied()).with_grace(self.grace_minutes))
    }

    /// Get a settings value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by key. Returns an error if the key is unknown
    /// or the value cannot be parsed as the existing type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let obj = root
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                serde_json::Value::Number(n.into())
            }
            serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(key.to_string(), new_value);
        Ok(())
    }
}
