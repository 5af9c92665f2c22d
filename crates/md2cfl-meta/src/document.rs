//! Source document: front matter plus cleaned Markdown body.

use crate::error::MetadataError;
use crate::front_matter::{FrontMatter, split_front_matter};
use crate::shortcode::strip_shortcodes;

/// A source document ready for Markdown parsing.
#[derive(Clone, Debug)]
pub struct SourceDocument {
    /// Parsed metadata preamble.
    pub front_matter: FrontMatter,
    /// Markdown body with shortcode tags removed.
    pub body: String,
}

impl SourceDocument {
    /// Split the preamble off and strip shortcodes from the body.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Missing`] if there is no preamble and
    /// [`MetadataError::Invalid`] if it cannot be parsed.
    pub fn parse(input: &str) -> Result<Self, MetadataError> {
        let (front_matter, body) = split_front_matter(input)?;
        Ok(Self {
            front_matter,
            body: strip_shortcodes(body).into_owned(),
        })
    }
}
