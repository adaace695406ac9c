//! Blog configuration management

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::error::{BlogError, Result};
use super::excerpt::DEFAULT_EXCERPT;

/// Directory scanned for articles when none is configured
pub const DEFAULT_CONTENT_DIR: &str = "content/articles";

/// Blog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Directory holding the markdown articles
    pub content_dir: Option<PathBuf>,
    /// Values used when an article omits a metadata field
    pub defaults: ArticleDefaults,
}

/// Fallback values applied by the article assembler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleDefaults {
    /// Category when `Catégorie` is absent
    pub category: String,
    /// Author when `Auteur` is absent (the agency name)
    pub author: String,
    /// Publication date when `Date` is absent
    pub date: String,
    /// Reading time when `Temps de lecture` is absent
    pub read_time: String,
    /// Cover image URL when `Image` is absent
    pub image: String,
    /// Tags when `Tags` is absent
    pub tags: Vec<String>,
    /// Excerpt when no prose line qualifies
    pub excerpt: String,
}

impl Default for ArticleDefaults {
    fn default() -> Self {
        Self {
            category: "WordPress".to_string(),
            author: "WP Agency Web".to_string(),
            date: "1 Mars 2024".to_string(),
            read_time: "5 min".to_string(),
            image: "https://images.pexels.com/photos/270348/pexels-photo-270348.jpeg?auto=compress&cs=tinysrgb&w=600".to_string(),
            tags: vec!["WordPress".to_string()],
            excerpt: DEFAULT_EXCERPT.to_string(),
        }
    }
}

impl BlogConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "agence-blog", "AgenceBlog")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| BlogError::config("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BlogError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Save configuration to the platform config directory
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| BlogError::config("Could not determine config directory"))?;
        self.save_to(&path)
    }

    /// Get the content directory
    pub fn content_dir(&self) -> PathBuf {
        self.content_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR))
    }
}
