//! Metadata error types.

/// Error while extracting the metadata preamble.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The document does not start with a front matter fence.
    #[error("document has no front matter (expected a leading `---` or `+++` block)")]
    Missing,

    /// The preamble exists but cannot be read as YAML or TOML, or a field
    /// has the wrong shape.
    #[error("invalid front matter: {reason}")]
    Invalid {
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl MetadataError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}
