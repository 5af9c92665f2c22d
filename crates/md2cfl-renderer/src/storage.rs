//! Confluence storage format (XHTML) dialect.

use std::fmt::Write;

use crate::dialect::{Element, Guard, MarkupDialect};
use crate::format::Format;

/// Storage format dialect.
///
/// Produces XHTML with:
/// - `ac:structured-macro` for code blocks, admonitions and custom macros
/// - CDATA-wrapped macro parameters and plain-text bodies
/// - `ac:image` with `ri:url` for images
/// - `<div>` around raw HTML blocks
pub struct StorageDialect;

impl MarkupDialect for StorageDialect {
    const FORMAT: Format = Format::Storage;

    fn open(element: Element<'_>, out: &mut String) {
        match element {
            Element::Paragraph { .. } => out.push_str("<p>"),
            Element::Heading(level) => write!(out, "<h{level}>").unwrap(),
            Element::Emphasis => out.push_str("<em>"),
            Element::Strong => out.push_str("<strong>"),
            Element::Strikethrough => {
                out.push_str(r#"<span style="text-decoration: line-through;">"#);
            }
            Element::InlineCode => out.push_str("<code>"),
            Element::BlockQuote => out.push_str("<blockquote>\n"),
            Element::List { ordered: false, .. } => out.push_str("<ul>\n"),
            Element::List {
                ordered: true,
                start,
                ..
            } => match start {
                Some(n) if n != 1 => writeln!(out, "<ol start=\"{n}\">").unwrap(),
                _ => out.push_str("<ol>\n"),
            },
            Element::Item { .. } => out.push_str("<li>"),
            Element::Link(destination) => {
                write!(out, r#"<a href="{}">"#, escape_html(destination)).unwrap();
            }
            Element::Image(destination) => write!(
                out,
                r#"<ac:image><ri:url ri:value="{}" /></ac:image>"#,
                escape_html(destination)
            )
            .unwrap(),
            Element::HorizontalRule => out.push_str("<hr />\n"),
            Element::Table => out.push_str("<table><tbody>\n"),
            Element::TableRow { .. } => out.push_str("<tr>"),
            Element::TableCell { header: true } => out.push_str("<th>"),
            Element::TableCell { header: false } => out.push_str("<td>"),
            Element::HtmlBlock => out.push_str("<div>"),
            Element::Macro { name, .. } => write!(
                out,
                r#"<ac:structured-macro ac:name="{}">"#,
                escape_html(name)
            )
            .unwrap(),
            Element::Parameter { name, .. } => {
                write!(out, r#"<ac:parameter ac:name="{}">"#, escape_html(name)).unwrap();
            }
            Element::PlainBody { .. } => out.push_str("<ac:plain-text-body>"),
            Element::RichBody { .. } => out.push_str("<ac:rich-text-body>\n"),
        }
    }

    fn close(element: Element<'_>, out: &mut String) {
        match element {
            Element::Paragraph { .. } => out.push_str("</p>\n"),
            Element::Heading(level) => writeln!(out, "</h{level}>").unwrap(),
            Element::Emphasis => out.push_str("</em>"),
            Element::Strong => out.push_str("</strong>"),
            Element::Strikethrough => out.push_str("</span>"),
            Element::InlineCode => out.push_str("</code>"),
            Element::BlockQuote => out.push_str("</blockquote>\n"),
            Element::List { ordered: false, .. } => out.push_str("</ul>\n"),
            Element::List { ordered: true, .. } => out.push_str("</ol>\n"),
            Element::Item { .. } => out.push_str("</li>\n"),
            Element::Link(_) => out.push_str("</a>"),
            Element::Image(_) | Element::HorizontalRule => {}
            Element::Table => out.push_str("</tbody></table>\n"),
            Element::TableRow { .. } => out.push_str("</tr>\n"),
            Element::TableCell { header: true } => out.push_str("</th>"),
            Element::TableCell { header: false } => out.push_str("</td>"),
            Element::HtmlBlock => out.push_str("</div>\n"),
            Element::Macro { .. } => out.push_str("</ac:structured-macro>\n"),
            Element::Parameter { .. } => out.push_str("</ac:parameter>"),
            Element::PlainBody { .. } => out.push_str("</ac:plain-text-body>"),
            Element::RichBody { .. } => out.push_str("</ac:rich-text-body>"),
        }
    }

    fn text(text: &str, out: &mut String) {
        out.push_str(&escape_html(text));
    }

    fn guarded(text: &str, _guard: Guard, out: &mut String) {
        out.push_str("<![CDATA[");
        // A literal `]]>` would end the section early; split it across two.
        out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
        out.push_str("]]>");
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_guarded_is_cdata() {
        let mut out = String::new();
        StorageDialect::guarded("a < b", Guard::Parameter, &mut out);
        assert_eq!(out, "<![CDATA[a < b]]>");
    }

    #[test]
    fn test_guarded_splits_cdata_terminator() {
        let mut out = String::new();
        StorageDialect::guarded("x]]>y", Guard::Body, &mut out);
        assert_eq!(out, "<![CDATA[x]]]]><![CDATA[>y]]>");
    }

    #[test]
    fn test_image_is_self_closing() {
        let mut out = String::new();
        StorageDialect::open(Element::Image("a&b.png"), &mut out);
        StorageDialect::close(Element::Image("a&b.png"), &mut out);
        assert_eq!(out, r#"<ac:image><ri:url ri:value="a&amp;b.png" /></ac:image>"#);
    }

    #[test]
    fn test_ordered_list_start() {
        let mut out = String::new();
        let list = Element::List {
            ordered: true,
            start: Some(3),
            depth: 1,
        };
        StorageDialect::open(list, &mut out);
        StorageDialect::close(list, &mut out);
        assert_eq!(out, "<ol start=\"3\">\n</ol>\n");
    }
}
