//! TOML-based engine configuration.
//!
//! Holds the defaults an external caller applies to requests:
//! - Default strategy and suggestion count
//! - Scoring curve constants
//! - Per-strategy weight overrides
//!
//! Configuration is stored at `~/.config/taskrank/config.toml`. The engine
//! never reads it on its own; callers load it and pass values in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, Result};
use crate::scoring::CurveParams;
use crate::strategy::{StrategyName, StrategyProfile, StrategyWeights};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub default_strategy: StrategyName,
    #[serde(default = "default_count")]
    pub default_count: i64,
    #[serde(default)]
    pub curves: CurveParams,
    /// Weight overrides keyed by strategy name.
    #[serde(default)]
    pub strategies: BTreeMap<String, StrategyWeights>,
}

fn default_count() -> i64 {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_strategy: StrategyName::default(),
            default_count: default_count(),
            curves: CurveParams::default(),
            strategies: BTreeMap::new(),
        }
    }
}

/// Returns `~/.config/taskrank[-dev]/` based on TASKRANK_ENV.
///
/// Set TASKRANK_ENV=dev to use the development config directory.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TASKRANK_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("taskrank-dev")
    } else {
        base_dir.join("taskrank")
    }
}

impl EngineConfig {
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
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let bad_value = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
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
                        value.parse::<bool>().map_err(|e| bad_value(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| bad_value(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(bad_value(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| bad_value(e.to_string()))?
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
    pub fn path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// fails validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };

        let cfg: EngineConfig = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check curve constants, override names and override weights.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.curves.validate()?;
        if self.default_count < 0 {
            return Err(ConfigError::InvalidValue {
                key: "default_count".into(),
                message: format!("must not be negative, got {}", self.default_count),
            });
        }
        for (name, weights) in &self.strategies {
            let key = format!("strategies.{name}");
            if name.parse::<StrategyName>().is_err() {
                return Err(ConfigError::InvalidValue {
                    key,
                    message: "not a known strategy".into(),
                });
            }
            weights.validate(&key)?;
        }
        Ok(())
    }

    /// Effective profile for `name`: the override if present, else the built-in.
    pub fn profile(&self, name: StrategyName) -> StrategyProfile {
        match self.strategies.get(name.as_str()) {
            Some(weights) => StrategyProfile {
                name,
                weights: *weights,
            },
            None => StrategyProfile::builtin(name),
        }
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

    /// Set a config value by dot-separated key, then re-validate.
    ///
    /// Setting a field under `strategies.<name>` seeds that override from the
    /// built-in weights first. The change is not persisted; call [`save_to`](Self::save_to).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed, or
    /// the resulting config is invalid. On error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut candidate = self.clone();
        if let Some(rest) = key.strip_prefix("strategies.") {
            let name = rest.split('.').next().unwrap_or_default();
            let strategy: StrategyName = name.parse()?;
            candidate
                .strategies
                .entry(name.to_string())
                .or_insert_with(|| strategy.default_weights());
        }

        let mut json = serde_json::to_value(&candidate)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: EngineConfig = serde_json::from_value(json).map_err(|e| {
            CoreError::from(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
