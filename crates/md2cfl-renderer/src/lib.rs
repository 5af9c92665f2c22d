//! Markdown to Confluence markup renderer.
//!
//! Builds a closed document tree from Markdown and renders it as either
//! Confluence wiki markup or XHTML storage format.
//!
//! # Architecture
//!
//! - [`parse_markdown`] folds pulldown-cmark events into a [`Node`] tree.
//! - [`MarkupRenderer`] walks the tree once, generic over a [`MarkupDialect`]:
//!   [`WikiDialect`] or [`StorageDialect`].
//! - [`collect_destinations`] gathers raw image and link targets for upload.
//!
//! Leaf directive paragraphs (`::name[body]{key="value"}`) become structured
//! macros.
//!
//! # Example
//!
//! ```
//! use md2cfl_renderer::{Format, RenderFlags, parse_markdown, render};
//!
//! let tree = parse_markdown("# Hello\n\n**Bold** text").unwrap();
//! assert_eq!(
//!     render(&tree, Format::Storage, RenderFlags::NONE),
//!     "<h1>Hello</h1>\n<p><strong>Bold</strong> text</p>\n"
//! );
//! ```

mod builder;
mod destinations;
mod dialect;
mod directive;
mod error;
mod flags;
mod format;
mod renderer;
mod storage;
mod tree;
mod wiki;

pub use builder::{build_tree, parse_markdown, parser_options};
pub use destinations::{DestinationKind, Destinations, collect_destinations};
pub use dialect::{Element, Guard, MarkupDialect};
pub use error::RenderError;
pub use flags::RenderFlags;
pub use format::Format;
pub use renderer::{MarkupRenderer, RenderContext, render};
pub use storage::{StorageDialect, escape_html};
pub use tree::{Admonition, Node, NodeKind, Visit};
pub use wiki::WikiDialect;
