//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type", default)]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
    /// Page body content.
    #[serde(default)]
    pub body: Option<Body>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default)]
    pub message: Option<String>,
}

/// Page body content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Body representation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    /// Markup content.
    pub value: String,
    /// Content representation (`storage` or `wiki`).
    pub representation: String,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
    /// API self link.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_page() {
        let json = r#"{
            "id": "42",
            "type": "page",
            "status": "current",
            "title": "Release notes",
            "version": {"number": 7, "when": "2024-01-01"},
            "body": {"storage": {"value": "<p>x</p>", "representation": "storage"}},
            "_links": {"webui": "/display/DOC/Release+notes"}
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.id, "42");
        assert_eq!(page.version.number, 7);
        let storage = page.body.as_ref().and_then(|b| b.storage.as_ref()).unwrap();
        assert_eq!(storage.value, "<p>x</p>");
        assert_eq!(storage.representation, "storage");
        assert_eq!(
            page.links.and_then(|l| l.webui).as_deref(),
            Some("/display/DOC/Release+notes")
        );
    }

    #[test]
    fn test_deserialize_page_without_body() {
        let page: Page =
            serde_json::from_str(r#"{"id": "1", "title": "T", "version": {"number": 1}}"#)
                .unwrap();
        assert!(page.body.is_none());
        assert!(page.content_type.is_empty());
    }
}
