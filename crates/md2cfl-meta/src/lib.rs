//! Front matter extraction for md2cfl source documents.
//!
//! A source document starts with a fenced metadata preamble followed by the
//! Markdown body:
//!
//! ```text
//! ---
//! title: Release notes
//! tags: [release, changelog]
//! confluence:
//!   base: https://wiki.example.com
//!   page: "123456"
//!   format: xml
//! ---
//! # Body starts here
//! ```
//!
//! The preamble is deserialized as YAML first and TOML second, so `+++`
//! fenced TOML preambles work the same way. Paired Hugo shortcodes
//! (`{{% note %}} ... {{% /note %}}`) are removed from the body before it is
//! handed to the Markdown parser.
//!
//! # Example
//!
//! ```
//! use md2cfl_meta::SourceDocument;
//!
//! let doc = SourceDocument::parse("---\ntitle: Hello\n---\nBody {{% note %}}text{{% /note %}}\n")?;
//! assert_eq!(doc.front_matter.title("Untitled"), "Hello");
//! assert_eq!(doc.body, "Body text\n");
//! # Ok::<(), md2cfl_meta::MetadataError>(())
//! ```

mod document;
mod error;
mod front_matter;
mod shortcode;

pub use document::SourceDocument;
pub use error::MetadataError;
pub use front_matter::{CONFLUENCE_GROUP, FrontMatter, split_front_matter};
pub use shortcode::strip_shortcodes;
