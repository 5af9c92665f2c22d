//! Renderer errors.

/// Error raised while building or rendering a document tree.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The parser produced an element the tree has no node kind for.
    #[error("unknown node kind: {0}")]
    UnknownNodeKind(String),

    /// Output format name is neither `wiki` nor `xml`/`storage`.
    #[error("unknown output format `{0}` (expected `wiki` or `xml`)")]
    UnknownFormat(String),
}
