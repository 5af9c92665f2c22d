//! Result types for publishing.

use std::path::{Path, PathBuf};

use md2cfl_renderer::Format;

use crate::types::Page;

/// Outcome of a publish.
#[derive(Debug)]
pub struct PublishResult {
    /// Page as returned by the update call.
    pub page: Page,
    /// Web URL of the page.
    pub url: String,
    /// Number of attachments uploaded or updated.
    pub attachments_uploaded: usize,
    /// Attachments that failed, with the reason.
    pub attachment_failures: Vec<(PathBuf, String)>,
    /// Labels present after tagging.
    pub labels: Vec<String>,
}

/// What a publish would do, computed without changing anything.
#[derive(Debug)]
pub struct DryRunResult {
    /// Rendered markup.
    pub markup: String,
    /// Body representation the markup would be sent as.
    pub format: Format,
    /// Title the page would get.
    pub title: String,
    /// Current page title.
    pub current_title: String,
    /// Current version number.
    pub current_version: u32,
    /// Local files that would be uploaded as attachments.
    pub attachments: Vec<PathBuf>,
    /// Names of attachments already on the page.
    pub existing_attachments: Vec<String>,
    /// Link destinations found in the document.
    pub links: Vec<String>,
    /// Labels that would be added.
    pub labels: Vec<String>,
}

impl DryRunResult {
    /// Whether uploading `path` would add a new version of an existing attachment.
    #[must_use]
    pub fn replaces_attachment(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.existing_attachments.iter().any(|e| e == name))
    }
}
