//! Confluence wiki markup dialect.

use std::fmt::Write;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::dialect::{Element, Guard, MarkupDialect, ensure_line_start};
use crate::format::Format;

/// Characters with markup meaning in authored text.
const SPECIAL_CHARS: &[char] = &[
    '\\', '{', '}', '[', ']', '*', '_', '|', '!', '^', '~', '+', '-', '#',
];

/// Characters that would end a link or image destination early.
const DESTINATION: &AsciiSet = &CONTROLS.add(b'|').add(b'[').add(b']').add(b'!');

/// Characters that would end a macro parameter early.
const PARAMETER_CHARS: &[char] = &['\\', '|', '}', '='];

/// Wiki markup dialect.
///
/// Block elements start on a fresh line. Paragraphs and headings are separated
/// by a blank line, except compact paragraphs inside list items and table cells
/// which stay on the item's line.
pub struct WikiDialect;

impl MarkupDialect for WikiDialect {
    const FORMAT: Format = Format::Wiki;

    fn open(element: Element<'_>, out: &mut String) {
        match element {
            Element::Paragraph { compact: true } => {
                if !out.is_empty() && !out.ends_with([' ', '\n', '|']) {
                    out.push(' ');
                }
            }
            Element::Paragraph { compact: false } | Element::Table => ensure_line_start(out),
            Element::Heading(level) => {
                ensure_line_start(out);
                write!(out, "h{level}. ").unwrap();
            }
            Element::Emphasis => out.push('_'),
            Element::Strong => out.push('*'),
            Element::Strikethrough => out.push('-'),
            Element::InlineCode => out.push_str("{{"),
            Element::BlockQuote => {
                ensure_line_start(out);
                out.push_str("{quote}\n");
            }
            Element::List { depth, .. } => {
                if depth == 1 {
                    ensure_line_start(out);
                }
            }
            Element::Item { marker } => {
                ensure_line_start(out);
                write!(out, "{marker} ").unwrap();
            }
            Element::Link(_) => out.push('['),
            Element::Image(destination) => {
                write!(out, "!{}!", utf8_percent_encode(destination, DESTINATION)).unwrap();
            }
            Element::HorizontalRule => {
                ensure_line_start(out);
                out.push_str("----\n");
            }
            Element::TableRow { .. } => ensure_line_start(out),
            Element::TableCell { header: true } => out.push_str("||"),
            Element::TableCell { header: false } => out.push('|'),
            Element::HtmlBlock => {}
            Element::Macro { name, .. } => {
                ensure_line_start(out);
                write!(out, "{{{name}").unwrap();
            }
            Element::Parameter { name, index } => {
                out.push(if index == 0 { ':' } else { '|' });
                write!(out, "{name}=").unwrap();
            }
            Element::PlainBody { .. } | Element::RichBody { .. } => out.push_str("}\n"),
        }
    }

    fn close(element: Element<'_>, out: &mut String) {
        match element {
            Element::Paragraph { compact: true }
            | Element::Image(_)
            | Element::HorizontalRule
            | Element::TableCell { .. }
            | Element::HtmlBlock
            | Element::Parameter { .. } => {}
            Element::Paragraph { compact: false } | Element::Heading(_) => out.push_str("\n\n"),
            Element::Emphasis => out.push('_'),
            Element::Strong => out.push('*'),
            Element::Strikethrough => out.push('-'),
            Element::InlineCode => out.push_str("}}"),
            Element::BlockQuote => {
                ensure_line_start(out);
                out.push_str("{quote}\n");
            }
            Element::List { depth, .. } => {
                if depth == 1 {
                    ensure_line_start(out);
                    out.push('\n');
                }
            }
            Element::Item { .. } => ensure_line_start(out),
            Element::Link(destination) => {
                write!(out, "|{}]", utf8_percent_encode(destination, DESTINATION)).unwrap();
            }
            Element::Table => out.push('\n'),
            Element::TableRow { header: true } => out.push_str("||\n"),
            Element::TableRow { header: false } => out.push_str("|\n"),
            Element::Macro { has_body, .. } => {
                if !has_body {
                    out.push('}');
                }
                out.push('\n');
            }
            Element::PlainBody { name } | Element::RichBody { name } => {
                ensure_line_start(out);
                write!(out, "{{{name}}}").unwrap();
            }
        }
    }

    fn text(text: &str, out: &mut String) {
        let mut line_start = out.is_empty() || out.ends_with('\n');
        for line in text.split_inclusive('\n') {
            if line_start && starts_block_signature(line) {
                out.push('\\');
            }
            escape_into(line, SPECIAL_CHARS, out);
            line_start = true;
        }
    }

    fn guarded(text: &str, guard: Guard, out: &mut String) {
        match guard {
            Guard::Parameter => escape_into(text, PARAMETER_CHARS, out),
            Guard::Body => out.push_str(text),
        }
    }
}

/// Whether a line opens with `h1.` to `h6.` or `bq.`, which turn the whole
/// line into a heading or a quote.
fn starts_block_signature(line: &str) -> bool {
    let rest = match line.as_bytes() {
        [b'h', b'1'..=b'6', b'.', ..] | [b'b', b'q', b'.', ..] => &line[3..],
        _ => return false,
    };
    rest.is_empty() || rest.starts_with(char::is_whitespace)
}

fn escape_into(text: &str, special: &[char], out: &mut String) {
    out.reserve(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_escaping() {
        let mut out = String::new();
        WikiDialect::text("a*b* [x|y] {code} -1", &mut out);
        assert_eq!(out, r"a\*b\* \[x\|y\] \{code\} \-1");
    }

    #[test]
    fn test_line_start_signatures() {
        let mut out = String::new();
        WikiDialect::text("h2. not a heading\nbq. not a quote\n# item", &mut out);
        assert_eq!(out, "\\h2. not a heading\n\\bq. not a quote\n\\# item");
    }

    #[test]
    fn test_signatures_mid_line_are_plain() {
        let mut out = "* ".to_owned();
        WikiDialect::text("h1. label and bq. text, h1.x", &mut out);
        assert_eq!(out, "* h1. label and bq. text, h1.x");

        let mut out = String::new();
        WikiDialect::text("h7. h1.5 bq.", &mut out);
        assert_eq!(out, "h7. h1.5 bq.");
    }

    #[test]
    fn test_destination_delimiters_are_encoded() {
        let mut out = String::new();
        WikiDialect::open(Element::Image("a|b!.png"), &mut out);
        WikiDialect::open(Element::Link("x"), &mut out);
        WikiDialect::text("t", &mut out);
        WikiDialect::close(Element::Link("https://x/[y]"), &mut out);
        assert_eq!(out, "!a%7Cb%21.png![t|https://x/%5By%5D]");
    }

    #[test]
    fn test_parameter_guard() {
        let mut out = String::new();
        WikiDialect::guarded("a|b=c}", Guard::Parameter, &mut out);
        assert_eq!(out, r"a\|b\=c\}");
    }

    #[test]
    fn test_body_guard_is_verbatim() {
        let mut out = String::new();
        WikiDialect::guarded("if (a | b) { *x }", Guard::Body, &mut out);
        assert_eq!(out, "if (a | b) { *x }");
    }

    #[test]
    fn test_macro_without_body() {
        let mut out = String::new();
        let toc = Element::Macro {
            name: "toc",
            has_body: false,
        };
        WikiDialect::open(toc, &mut out);
        WikiDialect::open(
            Element::Parameter {
                name: "maxLevel",
                index: 0,
            },
            &mut out,
        );
        WikiDialect::guarded("3", Guard::Parameter, &mut out);
        WikiDialect::open(
            Element::Parameter {
                name: "type",
                index: 1,
            },
            &mut out,
        );
        WikiDialect::guarded("flat", Guard::Parameter, &mut out);
        WikiDialect::close(toc, &mut out);
        assert_eq!(out, "{toc:maxLevel=3|type=flat}\n");
    }

    #[test]
    fn test_heading_starts_on_new_line() {
        let mut out = "text".to_owned();
        WikiDialect::open(Element::Heading(2), &mut out);
        WikiDialect::text("Title", &mut out);
        WikiDialect::close(Element::Heading(2), &mut out);
        assert_eq!(out, "text\nh2. Title\n\n");
    }
}
