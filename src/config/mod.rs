//! Configuration module for relalg.
//!
//! Handles the settings file and translator policies.

mod settings;

pub use settings::{
    LogSettings, OutputFormat, OutputSettings, Settings, SettingsError, TranslatorSettings,
    CONFIG_ENV,
};
