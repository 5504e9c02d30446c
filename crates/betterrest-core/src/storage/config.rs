//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default form inputs (wake time, sleep amount, coffee amount)
//! - Location of a model artifact to use instead of the built-in model
//! - Clock style for displayed times
//!
//! Configuration is stored at `~/.config/betterrest/config.toml`.
//! Predictions themselves are never written anywhere.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::inputs::{BedtimeInputs, CoffeeAmount, SleepAmount, WakeTime};
use crate::model::ModelSource;
use crate::predictor::ClockStyle;

/// Values the form starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_wake_time")]
    pub wake_time: String,
    #[serde(default = "default_sleep_amount")]
    pub sleep_amount: f64,
    #[serde(default = "default_coffee_amount")]
    pub coffee_amount: u32,
}

/// Model selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to a TOML model artifact. The built-in model is used when unset.
    #[serde(default)]
    pub artifact: Option<PathBuf>,
}

/// Display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub clock: ClockStyle,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/betterrest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_wake_time() -> String {
    WakeTime::default().to_string()
}
fn default_sleep_amount() -> f64 {
    SleepAmount::DEFAULT
}
fn default_coffee_amount() -> u32 {
    CoffeeAmount::DEFAULT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            wake_time: default_wake_time(),
            sleep_amount: default_sleep_amount(),
            coffee_amount: default_coffee_amount(),
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            let number = serde_json::Number::from_f64(n).ok_or_else(|| {
                                invalid(format!("cannot parse '{value}' as number"))
                            })?;
                            serde_json::Value::Number(number)
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::info!(path = %path.display(), "wrote default configuration");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
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

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the new value is not a valid
    /// form input. Other keys are left unchecked, so a file with several bad
    /// defaults can be repaired one key at a time.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.check_default(key)?;
        *self = updated;
        Ok(())
    }

    /// Validate the single `[defaults]` entry named by `key`.
    fn check_default(&self, key: &str) -> Result<(), CoreError> {
        let d = &self.defaults;
        match key {
            "defaults.wake_time" => {
                d.wake_time.parse::<WakeTime>()?;
            }
            "defaults.sleep_amount" => {
                SleepAmount::try_new(d.sleep_amount)?;
            }
            "defaults.coffee_amount" => {
                CoffeeAmount::try_new(d.coffee_amount)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Set a value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.set_value(key, value)?;
        self.save()?;
        Ok(())
    }

    /// Validated starting inputs for the form.
    pub fn inputs(&self) -> Result<BedtimeInputs, CoreError> {
        let d = &self.defaults;
        Ok(BedtimeInputs::new(
            d.wake_time.parse()?,
            SleepAmount::try_new(d.sleep_amount)?,
            CoffeeAmount::try_new(d.coffee_amount)?,
        ))
    }

    /// Where predictions load their model from.
    pub fn model_source(&self) -> ModelSource {
        match &self.model.artifact {
            Some(path) if !path.as_os_str().is_empty() => ModelSource::Artifact(path.clone()),
            _ => ModelSource::Builtin,
        }
    }
}
