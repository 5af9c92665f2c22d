//! Attachment operations for Confluence API.

use tracing::info;

use super::multipart::Multipart;
use super::{ConfluenceClient, check_status, encode};
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentsResponse};

impl ConfluenceClient {
    /// Upload or update attachment (upsert by filename).
    ///
    /// Existing attachments get a new version marked as a minor edit.
    pub fn upload_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        match self.find_attachment_by_name(page_id, filename)? {
            Some(existing) => {
                info!(
                    "Updating existing attachment '{}' (id={})",
                    filename, existing.id
                );
                self.update_attachment_data(page_id, &existing.id, filename, data, content_type, true)
            }
            None => {
                info!(
                    "Uploading new attachment '{}' to page {}",
                    filename, page_id
                );
                self.add_attachment(page_id, filename, data, content_type)
            }
        }
    }

    /// Attach a new file to a page.
    pub fn add_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        let url = format!("{}/child/attachment", self.content_url(page_id));
        let form = Multipart::new().file(filename, content_type, data);

        let response: AttachmentsResponse = self.post_multipart(&url, form)?.read_json()?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ConfluenceError::HttpResponse {
                status: 200,
                body: "Empty attachment response".to_owned(),
            })
    }

    /// Upload new data for an existing attachment.
    pub fn update_attachment_data(
        &self,
        page_id: &str,
        attachment_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
        minor_edit: bool,
    ) -> Result<Attachment, ConfluenceError> {
        let url = format!(
            "{}/child/attachment/{}/data",
            self.content_url(page_id),
            encode(attachment_id)
        );
        let form = Multipart::new()
            .file(filename, content_type, data)
            .field("minorEdit", if minor_edit { "true" } else { "false" });

        Ok(self.post_multipart(&url, form)?.read_json()?)
    }

    /// List attachments on a page.
    pub fn get_attachments(&self, page_id: &str) -> Result<AttachmentsResponse, ConfluenceError> {
        let url = format!("{}/child/attachment", self.content_url(page_id));

        info!("Getting attachments for page {}", page_id);

        let response = self.authorized(self.agent.get(&url)).call()?;
        Ok(check_status(response)?.read_json()?)
    }

    /// Find attachment by filename on a page.
    pub fn find_attachment_by_name(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Option<Attachment>, ConfluenceError> {
        let url = format!(
            "{}/child/attachment?filename={}",
            self.content_url(page_id),
            encode(filename)
        );

        let response = self.authorized(self.agent.get(&url)).call()?;
        let attachments: AttachmentsResponse = check_status(response)?.read_json()?;
        Ok(attachments
            .results
            .into_iter()
            .find(|a| a.title == filename))
    }

    fn post_multipart(&self, url: &str, form: Multipart) -> Result<ureq::Body, ConfluenceError> {
        let (content_type, body) = form.finish();

        let response = self
            .authorized(self.agent.post(url))
            .header("Content-Type", &content_type)
            .header("X-Atlassian-Token", "nocheck")
            .send(&body[..])?;

        check_status(response)
    }
}
