//! TOML-based configuration for relalg.
//!
//! Example configuration:
//! ```toml
//! [translator]
//! subquery_policy = "lenient"   # or "strict"
//! alias_policy = "reject"       # or "overwrite"
//!
//! [output]
//! format = "algebra"            # algebra | tree | json | flow
//! pretty = true
//!
//! [log]
//! filter = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::AliasPolicy;
use crate::translate::TranslateOptions;
use crate::validation::SubqueryPolicy;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "RELALG_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub translator: TranslatorSettings,
    pub output: OutputSettings,
    pub log: LogSettings,
}

/// Translator policies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslatorSettings {
    pub subquery_policy: SubqueryPolicy,
    pub alias_policy: AliasPolicy,
}

/// How `translate` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Infix algebra string.
    #[default]
    Algebra,
    /// Labeled tree as JSON.
    Tree,
    /// The whole translation (query, algebra, tree) as JSON.
    Json,
    /// Clause flow graph.
    Flow,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Algebra,
            pretty: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `RELALG_CONFIG`
    /// 2. `./relalg.toml`
    /// 3. `~/.config/relalg/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("relalg.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("relalg").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Load from an explicit path if given, otherwise the default locations.
    pub fn load_from(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions::default()
            .with_subquery_policy(self.translator.subquery_policy)
            .with_alias_policy(self.translator.alias_policy)
    }
}
