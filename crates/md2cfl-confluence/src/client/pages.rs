//! Page operations for Confluence API.

use serde_json::json;
use tracing::info;

use super::{ConfluenceClient, check_status};
use crate::error::ConfluenceError;
use crate::types::Page;

impl ConfluenceClient {
    /// Get page by ID with optional field expansion.
    pub fn get_page(&self, page_id: &str, expand: &[&str]) -> Result<Page, ConfluenceError> {
        let mut url = self.content_url(page_id);

        if !expand.is_empty() {
            url.push_str("?expand=");
            url.push_str(&expand.join(","));
        }

        info!("Getting page {}", page_id);

        let response = self.authorized(self.agent.get(&url)).call()?;
        Ok(check_status(response)?.read_json()?)
    }

    /// Replace the page body and title, bumping the version.
    ///
    /// `representation` is `wiki` or `storage`; the server converts wiki
    /// markup to storage format on save.
    pub fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        representation: &str,
        version: u32,
        message: Option<&str>,
    ) -> Result<Page, ConfluenceError> {
        let url = self.content_url(page_id);

        let mut payload = json!({
            "id": page_id,
            "type": "page",
            "title": title,
            "body": {
                "storage": {
                    "value": body,
                    "representation": representation
                }
            },
            "version": {"number": version + 1}
        });

        if let Some(msg) = message {
            payload["version"]["message"] = json!(msg);
        }

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            version,
            version + 1
        );

        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .authorized(self.agent.put(&url))
            .header("Content-Type", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = check_status(response)?.read_json()?;
        info!(
            "Updated page {} to version {}",
            page_id, page.version.number
        );
        Ok(page)
    }

    /// Web URL of an already fetched page.
    #[must_use]
    pub fn page_url(&self, page: &Page) -> String {
        if let Some(links) = &page.links
            && let Some(webui) = &links.webui
        {
            return format!("{}{}", self.base_url, webui);
        }

        format!(
            "{}/pages/viewpage.action?pageId={}",
            self.base_url, page.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Auth;
    use crate::types::{Links, Version};
    use pretty_assertions::assert_eq;

    fn page(links: Option<Links>) -> Page {
        Page {
            id: "42".to_owned(),
            content_type: "page".to_owned(),
            title: "T".to_owned(),
            version: Version {
                number: 1,
                message: None,
            },
            body: None,
            links,
        }
    }

    #[test]
    fn test_page_url_from_webui_link() {
        let client = ConfluenceClient::new("https://wiki.example.com/", Auth::Bearer("t".to_owned()));
        let links = Links {
            webui: Some("/display/DOC/T".to_owned()),
            self_link: None,
        };
        assert_eq!(
            client.page_url(&page(Some(links))),
            "https://wiki.example.com/display/DOC/T"
        );
    }

    #[test]
    fn test_page_url_fallback() {
        let client = ConfluenceClient::new("https://wiki.example.com", Auth::Bearer("t".to_owned()));
        assert_eq!(
            client.page_url(&page(None)),
            "https://wiki.example.com/pages/viewpage.action?pageId=42"
        );
    }
}
