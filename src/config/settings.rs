//! Persisted settings for audiograb.

use crate::error::{GrabError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure, stored as a small JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder the MP3 files are written to. Empty until the user picks one.
    pub destination_folder: String,
}

impl Settings {
    /// Keys accepted by `config set`.
    pub const KEYS: &'static [&'static str] = &["destination_folder"];

    /// Load settings from a specific path, or default location if None.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set a value by key name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "destination_folder" => {
                self.destination_folder = value.to_string();
                Ok(())
            }
            _ => Err(GrabError::Config(format!(
                "Unknown key '{}'. Known keys: {}",
                key,
                Self::KEYS.join(", ")
            ))),
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("audiograb")
            .join("config.json")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

/// Location-bound handle to the settings file.
///
/// The batch launcher writes the destination folder through this before
/// starting any download.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn at_default_location() -> Self {
        Self::new(Settings::default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings> {
        Settings::load_from(Some(self.path.as_path()))
    }

    /// Stored destination folder, or an empty string when none was saved.
    pub fn load_destination(&self) -> Result<String> {
        Ok(self.load()?.destination_folder)
    }

    /// Overwrite the stored destination folder.
    pub fn save_destination(&self, folder: &str) -> Result<()> {
        let mut settings = self.load().unwrap_or_default();
        settings.destination_folder = folder.to_string();
        settings.save_to(&self.path)
    }
}
