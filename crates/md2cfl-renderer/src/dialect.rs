//! Markup dialect trait.
//!
//! The renderer walks the tree once and describes what it sees as a sequence
//! of [`Element`] open/close calls plus text writes. A dialect decides how each
//! of those is spelled. Wiki markup and storage XML are the two implementations.

use crate::format::Format;

/// Structural element emitted by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element<'a> {
    /// Paragraph. Compact paragraphs sit inside list items or table cells.
    Paragraph { compact: bool },
    /// Heading level 1 to 6.
    Heading(u8),
    Emphasis,
    Strong,
    Strikethrough,
    InlineCode,
    BlockQuote,
    /// List; `depth` is 1 for a top-level list.
    List {
        ordered: bool,
        start: Option<u64>,
        depth: usize,
    },
    /// List item; `marker` holds the wiki bullet prefix (`*`, `#*`, ...).
    Item { marker: &'a str },
    Link(&'a str),
    Image(&'a str),
    HorizontalRule,
    Table,
    TableRow { header: bool },
    TableCell { header: bool },
    HtmlBlock,
    /// Structured macro.
    Macro { name: &'a str, has_body: bool },
    /// Macro parameter; `index` is its position among the macro's parameters.
    Parameter { name: &'a str, index: usize },
    /// Macro body kept as raw text (code).
    PlainBody { name: &'a str },
    /// Macro body holding rendered markup.
    RichBody { name: &'a str },
}

/// What a guarded write protects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Macro parameter value.
    Parameter,
    /// Plain-text macro body.
    Body,
}

/// Dialect-specific spelling of elements and text.
///
/// All methods are associated functions writing into `out`, so a renderer is
/// generic over the dialect without holding an instance.
pub trait MarkupDialect {
    /// Format this dialect produces.
    const FORMAT: Format;

    /// Write the opening marker of `element`.
    ///
    /// Self-closing elements (image, horizontal rule) are written entirely here.
    fn open(element: Element<'_>, out: &mut String);

    /// Write the closing marker of `element`.
    fn close(element: Element<'_>, out: &mut String);

    /// Write authored text, escaping characters significant to the dialect.
    fn text(text: &str, out: &mut String);

    /// Write text that must reach the wiki unchanged inside a macro.
    fn guarded(text: &str, guard: Guard, out: &mut String);

    /// Write bytes verbatim.
    fn literal(text: &str, out: &mut String) {
        out.push_str(text);
    }
}

/// Push a newline unless `out` is empty or already ends with one.
pub(crate) fn ensure_line_start(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
