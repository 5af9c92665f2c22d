//! Confluence label types.

use serde::{Deserialize, Serialize};

/// Content label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    /// Label namespace (`global` for user labels).
    pub prefix: String,
    /// Label name.
    pub name: String,
}

impl Label {
    /// Global label with the given name.
    #[must_use]
    pub fn global(name: &str) -> Self {
        Self {
            prefix: "global".to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Labels API response.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelsResponse {
    pub results: Vec<Label>,
}
