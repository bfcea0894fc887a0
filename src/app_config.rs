use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::database::DatabaseConnection;
use crate::model::ModelDefinition;
use crate::translation::LocaleContext;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Application locale (ISO language code, optionally with region)
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Locale consulted when a translation is missing; `null` disables it
    #[serde(default = "default_fallback_locale")]
    pub fallback_locale: Option<String>,

    /// Value returned when neither the locale nor the fallback locale has one
    #[serde(default)]
    pub fallback_value: Value,

    /// SQLite database file; defaults to the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Known models
    #[serde(default)]
    pub models: Vec<ModelDefinition>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_fallback_locale() -> Option<String> {
    Some(default_locale())
}

impl Config {
    /// Read a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Read a configuration file, writing the defaults first when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate locales
        crate::language_utils::validate_locale(&self.locale)?;
        if let Some(fallback_locale) = &self.fallback_locale {
            crate::language_utils::validate_locale(fallback_locale)?;
        }

        // Validate model declarations
        let mut names = HashSet::new();
        for model in &self.models {
            if model.name.trim().is_empty() {
                return Err(anyhow!("Model name must not be empty"));
            }
            if model.table.trim().is_empty() {
                return Err(anyhow!("Model '{}' has no table", model.name));
            }
            if !names.insert(model.name.as_str()) {
                return Err(anyhow!("Model '{}' is declared more than once", model.name));
            }
        }

        Ok(())
    }

    /// Locale and fallback options for translation stores
    pub fn locale_context(&self) -> LocaleContext {
        let context = LocaleContext::new(self.locale.clone())
            .with_fallback_value(self.fallback_value.clone());

        match &self.fallback_locale {
            Some(fallback_locale) => context.with_fallback_locale(fallback_locale.clone()),
            None => context,
        }
    }

    /// Look up a model by name
    pub fn find_model(&self, name: &str) -> Option<&ModelDefinition> {
        self.models.iter().find(|model| model.name == name)
    }

    /// Configured database file, or the platform default
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DatabaseConnection::default_database_path(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            locale: default_locale(),
            fallback_locale: default_fallback_locale(),
            fallback_value: Value::Null,
            database_path: None,
            log_level: LogLevel::default(),
            models: Vec::new(),
        }
    }
}
