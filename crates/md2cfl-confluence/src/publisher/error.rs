//! Error types for publishing.

use md2cfl_config::ConfigError;
use md2cfl_meta::MetadataError;
use md2cfl_renderer::RenderError;

use crate::error::ConfluenceError;

/// Error while preparing or publishing a page.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Front matter missing or malformed.
    #[error("Invalid front matter: {0}")]
    Metadata(#[from] MetadataError),

    /// Markdown could not be turned into markup.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Confluence API error.
    #[error("Confluence API error: {0}")]
    Confluence(#[from] ConfluenceError),

    /// Invalid settings.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Missing required setting.
    #[error("{0}")]
    Missing(String),

    /// IO error (reading the document or writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
