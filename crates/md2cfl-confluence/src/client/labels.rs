//! Label operations for Confluence API.

use tracing::info;

use super::{ConfluenceClient, check_status};
use crate::error::ConfluenceError;
use crate::types::{Label, LabelsResponse};

impl ConfluenceClient {
    /// Add global labels to a page. Labels already present are kept as is.
    pub fn add_labels(&self, page_id: &str, names: &[String]) -> Result<Vec<Label>, ConfluenceError> {
        let url = format!("{}/label", self.content_url(page_id));
        let labels: Vec<Label> = names.iter().map(|name| Label::global(name)).collect();

        info!("Adding {} label(s) to page {}", labels.len(), page_id);

        let payload_bytes = serde_json::to_vec(&labels)?;
        let response = self
            .authorized(self.agent.post(&url))
            .header("Content-Type", "application/json")
            .send(&payload_bytes[..])?;

        let response: LabelsResponse = check_status(response)?.read_json()?;
        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_payload() {
        let labels = vec![Label::global("release")];
        assert_eq!(
            serde_json::to_string(&labels).unwrap(),
            r#"[{"prefix":"global","name":"release"}]"#
        );
    }
}
