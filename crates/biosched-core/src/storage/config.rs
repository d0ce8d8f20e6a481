//! TOML-based application configuration.
//!
//! Stores:
//! - Biological parameters (wake time, chronotype lag, fatigue rate)
//! - The user id that telemetry is recorded under
//! - Telemetry database location and connection retry settings
//!
//! Configuration is stored at `~/.config/biosched/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::biomodel::BioParams;
use crate::error::ConfigError;
use crate::telemetry::RetryPolicy;

/// Biological parameter defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioConfig {
    /// Wake time as "HH:MM", applied to the planning day
    #[serde(default = "default_wake_time")]
    pub wake_time: String,
    #[serde(default)]
    pub chronotype_lag: f64,
    #[serde(default = "default_fatigue_rate")]
    pub fatigue_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub id: String,
}

/// Telemetry database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides `<data_dir>/biosched.db`
    #[serde(default)]
    pub database_path: Option<String>,
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/biosched/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bio: BioConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_wake_time() -> String {
    "07:00".into()
}
fn default_fatigue_rate() -> f64 {
    16.0
}
fn default_user_id() -> String {
    "user_001".into()
}
fn default_connect_attempts() -> u32 {
    5
}
fn default_retry_delay_ms() -> u64 {
    2000
}

impl Default for BioConfig {
    fn default() -> Self {
        Self {
            wake_time: default_wake_time(),
            chronotype_lag: 0.0,
            fatigue_rate: default_fatigue_rate(),
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: default_user_id(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            connect_attempts: default_connect_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl BioConfig {
    /// Parse `wake_time` as a wall-clock time of day.
    pub fn wake_time_of_day(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(&self.wake_time, "%H:%M").map_err(|e| {
            ConfigError::InvalidValue {
                key: "bio.wake_time".into(),
                message: format!("expected HH:MM, got '{}' ({e})", self.wake_time),
            }
        })
    }

    /// Biological parameters for someone who woke at `wake_time` on `day`.
    pub fn params_for(&self, day: NaiveDate) -> Result<BioParams, ConfigError> {
        let wake = day.and_time(self.wake_time_of_day()?);
        Ok(BioParams::new(wake, self.chronotype_lag, self.fatigue_rate))
    }
}

impl StorageConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.connect_attempts,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

impl Config {
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                break;
            }
            if parts.peek().is_some() {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                continue;
            }

            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) => return Err(ConfigError::UnknownKey(key.to_string())),
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value by dot-separated key, without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.bio.wake_time_of_day()?;
        *self = updated;
        Ok(())
    }

    /// Telemetry database path, honoring `storage.database_path`.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.database_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(data_dir()?.join("biosched.db")),
        }
    }
}
