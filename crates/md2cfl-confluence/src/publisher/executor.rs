//! Page publisher implementation.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;

use super::error::PublishError;
use super::prepared::{PreparedPage, content_type_for};
use super::result::{DryRunResult, PublishResult};

/// Handles pushing prepared documents to Confluence pages.
pub struct PagePublisher<'a> {
    client: &'a ConfluenceClient,
}

impl<'a> PagePublisher<'a> {
    /// Create a new page publisher.
    #[must_use]
    pub fn new(client: &'a ConfluenceClient) -> Self {
        Self { client }
    }

    /// Publish a prepared document to its page.
    ///
    /// Attachment failures are logged and reported in the result; they do not
    /// abort the publish.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the document names no page ID
    /// - fetching or updating the page fails
    /// - adding labels fails
    pub fn publish(
        &self,
        page: &PreparedPage,
        message: Option<&str>,
    ) -> Result<PublishResult, PublishError> {
        let page_id = page.require_page_id()?;

        let current_page = self.client.get_page(page_id, &["version"])?;
        let title = page.title.as_deref().unwrap_or(&current_page.title);

        let updated_page = self.client.update_page(
            page_id,
            title,
            &page.markup,
            page.format.representation(),
            current_page.version.number,
            message,
        )?;

        let mut attachments_uploaded = 0;
        let mut attachment_failures = Vec::new();
        for path in page.attachments() {
            match self.upload(page_id, &path) {
                Ok(()) => attachments_uploaded += 1,
                Err(e) => {
                    warn!("Failed to upload {}: {}", path.display(), e);
                    attachment_failures.push((path, e.to_string()));
                }
            }
        }

        let labels = if page.labels.is_empty() {
            Vec::new()
        } else {
            self.client
                .add_labels(page_id, &page.labels)?
                .into_iter()
                .map(|label| label.name)
                .collect()
        };

        let url = self.client.page_url(&updated_page);
        info!("Published {} to {}", page.source.display(), url);

        Ok(PublishResult {
            page: updated_page,
            url,
            attachments_uploaded,
            attachment_failures,
            labels,
        })
    }

    /// Describe what [`publish`](Self::publish) would do without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the document names no page ID, or the page or its
    /// attachments cannot be fetched.
    pub fn dry_run(&self, page: &PreparedPage) -> Result<DryRunResult, PublishError> {
        let page_id = page.require_page_id()?;
        let current_page = self.client.get_page(page_id, &["version"])?;
        let existing_attachments = self
            .client
            .get_attachments(page_id)?
            .results
            .into_iter()
            .map(|attachment| attachment.title)
            .collect();

        Ok(DryRunResult {
            markup: page.markup.clone(),
            format: page.format,
            title: page
                .title
                .clone()
                .unwrap_or_else(|| current_page.title.clone()),
            current_title: current_page.title,
            current_version: current_page.version.number,
            attachments: page.attachments(),
            existing_attachments,
            links: page.destinations.links.clone(),
            labels: page.labels.clone(),
        })
    }

    fn upload(&self, page_id: &str, path: &Path) -> Result<(), AttachmentError> {
        let filename = attachment_name(path).ok_or_else(|| AttachmentError::Name(path.into()))?;
        let data = std::fs::read(path)?;
        self.client
            .upload_attachment(page_id, filename, &data, content_type_for(path))?;
        Ok(())
    }
}

/// Name an attachment is stored under: the file's base name.
fn attachment_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Reason a single attachment could not be uploaded.
#[derive(Debug, thiserror::Error)]
enum AttachmentError {
    #[error("file name is not valid UTF-8: {}", .0.display())]
    Name(PathBuf),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Confluence(#[from] ConfluenceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attachment_name_is_base_name() {
        assert_eq!(
            attachment_name(Path::new("docs/img/flow chart.png")),
            Some("flow chart.png")
        );
        assert_eq!(attachment_name(Path::new("docs/..")), None);
    }

    #[test]
    fn test_attachment_error_message() {
        let err = AttachmentError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.to_string(), "missing");
    }
}
