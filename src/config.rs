use crate::error::{FridgeChefError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model passed to the provider CLI (provider-specific meaning).
    pub model: String,

    /// Photos larger than this on the longest side are downscaled
    /// before submission.
    pub max_image_size: u32,

    /// Command used to speak narration text. None = platform default.
    pub speech_command: Option<String>,

    /// Override for where shopping list / ratings / cache files live.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gemini-3-pro-preview".into(),
            max_image_size: 1568,
            speech_command: None,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            // A corrupt config falls back to defaults, it never blocks startup
            Ok(serde_json::from_str(&content).unwrap_or_default())
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FridgeChefError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("fridgechef").join("config.json"))
    }

    /// Directory holding the persisted shopping list, ratings and
    /// analysis cache. Created on demand.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => Self::config_path()?
                .parent()
                .map(|p| p.to_path_buf())
                .ok_or_else(|| FridgeChefError::Config("config dir not resolvable".into()))?,
        };
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
