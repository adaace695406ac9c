//! Error types for the article pipeline

use thiserror::Error;

/// Errors raised while loading, assembling or fetching articles
#[derive(Error, Debug)]
pub enum BlogError {
    /// Slug absent from the document store
    #[error("Article not found: {0}")]
    NotFound(String),

    /// Loader failed or returned text that cannot become an article
    #[error("Failed to load article {slug}: {reason}")]
    LoadFailure { slug: String, reason: String },

    /// Some documents of a batch failed; the rest loaded
    #[error("{failed} article(s) failed to load, {loaded} loaded")]
    PartialCollection { failed: usize, loaded: usize },

    /// IO error while reading documents or configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlogError {
    /// Create a not found error
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound(slug.into())
    }

    /// Create a load failure for one document
    pub fn load_failure(slug: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::LoadFailure {
            slug: slug.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error means the slug does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using [`BlogError`]
pub type Result<T> = std::result::Result<T, BlogError>;
