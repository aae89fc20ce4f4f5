use crate::config::paths::AppDir;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_YAML_NAME: &str = "config.yaml";
pub const SECRETS_YAML_NAME: &str = "secrets.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration value not found: {0}")]
    NotFound(String),
    #[error("Failed to deserialize value: {0}")]
    DeserializeError(String),
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::DeserializeError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::DeserializeError(err.to_string())
    }
}

/// Layered configuration: environment variables first, then YAML files in the
/// config directory.
///
/// Keys are looked up in the environment using their upper-case form, so
/// `google_host` in `config.yaml` is overridden by `GOOGLE_HOST`. Environment
/// values are parsed as JSON when possible and otherwise taken as strings.
/// Secrets live in a separate `secrets.yaml` so the main file can be shared.
pub struct Config {
    config_path: PathBuf,
    secrets_path: PathBuf,
}

static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::default);

impl Default for Config {
    fn default() -> Self {
        Self::new(
            AppDir::Config.join(CONFIG_YAML_NAME),
            AppDir::Config.join(SECRETS_YAML_NAME),
        )
    }
}

impl Config {
    pub fn global() -> &'static Config {
        &GLOBAL_CONFIG
    }

    pub fn new(config_path: impl Into<PathBuf>, secrets_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            secrets_path: secrets_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// All values from `config.yaml`. A missing file is an empty config.
    pub fn all_values(&self) -> Result<HashMap<String, Value>, ConfigError> {
        Self::load_yaml(&self.config_path)
    }

    pub fn get_param<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.lookup(key, &self.config_path)
    }

    pub fn get_secret<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.lookup(key, &self.secrets_path)
    }

    pub fn set_param(&self, key: &str, value: Value) -> Result<(), ConfigError> {
        let mut values = Self::load_yaml(&self.config_path)?;
        values.insert(key.to_string(), value);

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(&values)?;
        fs::write(&self.config_path, yaml)?;
        Ok(())
    }

    fn lookup<T: DeserializeOwned>(&self, key: &str, file: &Path) -> Result<T, ConfigError> {
        let env_key = key.to_uppercase();
        if let Ok(val) = std::env::var(&env_key) {
            let value: Value = serde_json::from_str(&val).unwrap_or(Value::String(val));
            return Ok(serde_json::from_value(value)?);
        }

        let values = Self::load_yaml(file)?;
        let value = values
            .get(key)
            .or_else(|| values.get(&key.to_lowercase()))
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        Ok(serde_json::from_value(value)?)
    }

    fn load_yaml(path: &Path) -> Result<HashMap<String, Value>, ConfigError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        let values: HashMap<String, Value> = serde_yaml::from_str(&content)?;
        Ok(values)
    }
}
