//! Configuration handling for form defaults

use crate::format::Language;
use crate::props::Size;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for controlled fields
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FieldsConfig {
    /// Language code driving number separators ("it" or "en")
    pub language: Option<String>,
    /// Default number of decimals for number fields
    pub decimal_scale: Option<u32>,
    /// Default size of text and number fields
    pub field_size: Option<Size>,
}

impl FieldsConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "controlled-fields", "controlled-fields")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FieldsConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn language(&self) -> Language {
        self.language
            .as_deref()
            .map(Language::from_code)
            .unwrap_or_default()
    }

    pub fn decimal_scale(&self) -> u32 {
        self.decimal_scale.unwrap_or(0)
    }

    pub fn field_size(&self) -> Size {
        self.field_size.unwrap_or(Size::Small)
    }
}
