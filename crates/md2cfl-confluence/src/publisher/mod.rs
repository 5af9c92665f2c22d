//! Publishing Markdown documents to Confluence pages.
//!
//! [`PreparedPage`] reads a document, resolves its target from front matter
//! and options, and renders it. [`PagePublisher`] then runs the workflow:
//!
//! 1. Fetch the current page for its version and title
//! 2. Replace the page body, bumping the version
//! 3. Upload local images as attachments
//! 4. Add front matter tags as labels
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use md2cfl_confluence::{
//!     Auth, ConfluenceClient, PagePublisher, PreparedPage, PublishConfig, PublishOptions,
//! };
//! use md2cfl_config::RenderConfig;
//!
//! let config = PublishConfig::from_render_config(&RenderConfig::default())?;
//! let page = PreparedPage::load(Path::new("docs/guide.md"), &config, &PublishOptions::default())?;
//!
//! let client = ConfluenceClient::new(
//!     "https://confluence.example.com",
//!     Auth::Bearer("token".to_owned()),
//! );
//! let publisher = PagePublisher::new(&client);
//!
//! // Preview first
//! let preview = publisher.dry_run(&page)?;
//! println!("{} -> version {}", preview.title, preview.current_version + 1);
//!
//! let result = publisher.publish(&page, Some("Sync from docs"))?;
//! println!("{}", result.url);
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod prepared;
mod result;

pub use error::PublishError;
pub use executor::PagePublisher;
pub use prepared::PreparedPage;
pub use result::{DryRunResult, PublishResult};

use md2cfl_config::RenderConfig;
use md2cfl_renderer::{Format, RenderFlags};

/// Rendering settings applied to every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishConfig {
    /// Format used when front matter does not name one.
    pub default_format: Format,
    /// Optional renderer behaviours.
    pub flags: RenderFlags,
}

impl PublishConfig {
    /// Build from the `[render]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Render`] if the format name is unknown.
    pub fn from_render_config(render: &RenderConfig) -> Result<Self, PublishError> {
        let default_format: Format = render.format.parse()?;
        let flags = RenderFlags::NONE
            .with(RenderFlags::ADMONITIONS, render.admonitions)
            .with(RenderFlags::RAW_WIKI, render.raw_wiki);
        Ok(Self {
            default_format,
            flags,
        })
    }
}

/// Per-invocation fallbacks for values front matter may leave out.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Page ID used when front matter has no `confluence.page`.
    pub page_id: Option<String>,
    /// Title used when front matter has no `title`.
    pub title: Option<String>,
    /// Version comment for the update.
    pub message: Option<String>,
}
