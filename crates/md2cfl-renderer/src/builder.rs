//! Folds pulldown-cmark events into a [`Node`] tree.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use tracing::debug;

use crate::directive::parse_leaf_directive;
use crate::error::RenderError;
use crate::tree::{Admonition, Node, NodeKind};

/// Parser options used by [`parse_markdown`]: tables, strikethrough and GFM alerts.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_GFM
}

/// Parse Markdown text into a document tree.
///
/// # Errors
///
/// Returns [`RenderError::UnknownNodeKind`] if the parser produces an element
/// that has no node kind.
pub fn parse_markdown(markdown: &str) -> Result<Node, RenderError> {
    build_tree(Parser::new_ext(markdown, parser_options()))
}

/// Build a document tree from a stream of parser events.
///
/// Tables are normalized so that the head always holds exactly one row and
/// the remaining rows sit inside a [`NodeKind::TableBody`].
///
/// # Errors
///
/// Returns [`RenderError::UnknownNodeKind`] for footnotes, math, definition
/// lists, task list markers, metadata blocks and super/subscript.
pub fn build_tree<'a, I>(events: I) -> Result<Node, RenderError>
where
    I: IntoIterator<Item = Event<'a>>,
{
    let mut builder = TreeBuilder::new();
    for event in events {
        builder.event(event)?;
    }
    Ok(builder.finish())
}

struct TreeBuilder {
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Node::document(Vec::new())],
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start_tag(tag)?,
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_leaf(NodeKind::Code(code.into_string())),
            Event::Html(html) => self.push_html(&html),
            Event::InlineHtml(html) => self.push_leaf(NodeKind::InlineHtml(html.into_string())),
            Event::SoftBreak => self.push_text("\n"),
            Event::HardBreak => {
                self.push_leaf(NodeKind::HardBreak);
                self.push_text("\n");
            }
            Event::Rule => self.push_leaf(NodeKind::HorizontalRule),
            Event::TaskListMarker(_) => return Err(unknown("task list marker")),
            Event::FootnoteReference(_) => return Err(unknown("footnote reference")),
            Event::InlineMath(_) => return Err(unknown("inline math")),
            Event::DisplayMath(_) => return Err(unknown("display math")),
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) -> Result<(), RenderError> {
        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading {
                level: heading_level_to_num(level),
            },
            Tag::BlockQuote(kind) => NodeKind::BlockQuote {
                admonition: kind.map(Admonition::from),
            },
            Tag::CodeBlock(kind) => NodeKind::CodeBlock {
                language: fence_language(&kind),
                literal: String::new(),
            },
            Tag::HtmlBlock => NodeKind::HtmlBlock(String::new()),
            Tag::List(start) => NodeKind::List {
                ordered: start.is_some(),
                start,
            },
            Tag::Item => NodeKind::Item,
            Tag::Table(_) => NodeKind::Table,
            Tag::TableHead => {
                self.stack.push(Node::new(NodeKind::TableHead));
                NodeKind::TableRow
            }
            Tag::TableRow => NodeKind::TableRow,
            Tag::TableCell => NodeKind::TableCell,
            Tag::Emphasis => NodeKind::Emphasis,
            Tag::Strong => NodeKind::Strong,
            Tag::Strikethrough => NodeKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => NodeKind::Link {
                destination: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => NodeKind::Image {
                destination: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::FootnoteDefinition(_) => return Err(unknown("footnote definition")),
            Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => return Err(unknown("definition list")),
            Tag::MetadataBlock(_) => return Err(unknown("metadata block")),
            Tag::Superscript => return Err(unknown("superscript")),
            Tag::Subscript => return Err(unknown("subscript")),
        };
        self.stack.push(Node::new(kind));
        Ok(())
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::TableHead => {
                self.close_top(); // row
                self.close_top(); // head
                self.stack.push(Node::new(NodeKind::TableBody));
            }
            TagEnd::Table => {
                if self
                    .stack
                    .last()
                    .is_some_and(|n| n.kind == NodeKind::TableBody)
                {
                    self.close_top();
                }
                self.close_top();
            }
            _ => self.close_top(),
        }
    }

    /// Pop the innermost open node and attach it to its parent.
    fn close_top(&mut self) {
        if self.stack.len() < 2 {
            debug!("Ignoring unbalanced end event");
            return;
        }
        let Some(mut node) = self.stack.pop() else {
            return;
        };
        if node.kind == NodeKind::Paragraph {
            node = paragraph_or_macro(node);
        }
        self.current().children.push(node);
    }

    fn current(&mut self) -> &mut Node {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push_leaf(&mut self, kind: NodeKind) {
        self.current().children.push(Node::new(kind));
    }

    fn push_text(&mut self, text: &str) {
        let node = self.current();
        match &mut node.kind {
            NodeKind::CodeBlock { literal, .. } => literal.push_str(text),
            NodeKind::HtmlBlock(html) => html.push_str(text),
            _ => {
                if let Some(Node {
                    kind: NodeKind::Text(last),
                    ..
                }) = node.children.last_mut()
                {
                    last.push_str(text);
                } else {
                    node.children.push(Node::text(text));
                }
            }
        }
    }

    fn push_html(&mut self, html: &str) {
        if let NodeKind::HtmlBlock(block) = &mut self.current().kind {
            block.push_str(html);
        } else {
            self.push_leaf(NodeKind::HtmlBlock(html.to_owned()));
        }
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close_top();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| Node::document(Vec::new()))
    }
}

/// Turn a paragraph holding only a `::name{...}` line into a macro node.
fn paragraph_or_macro(paragraph: Node) -> Node {
    let all_text = !paragraph.children.is_empty()
        && paragraph
            .children
            .iter()
            .all(|child| matches!(child.kind, NodeKind::Text(_)));
    if !all_text {
        return paragraph;
    }

    let text = paragraph.plain_text();
    match parse_leaf_directive(&text) {
        Some(directive) => {
            let children = if directive.body.is_empty() {
                Vec::new()
            } else {
                vec![Node::text(directive.body)]
            };
            Node::with_children(
                NodeKind::Macro {
                    name: directive.name,
                    parameters: directive.parameters,
                },
                children,
            )
        }
        None => paragraph,
    }
}

/// First word of a fenced code block's info string.
fn fence_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .map(|lang| lang.trim_matches(|c| c == '{' || c == '}' || c == '.'))
            .filter(|lang| !lang.is_empty())
            .map(str::to_owned),
        CodeBlockKind::Indented => None,
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn unknown(kind: &str) -> RenderError {
    RenderError::UnknownNodeKind(kind.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(node: &Node) -> Vec<&NodeKind> {
        node.children.iter().map(|c| &c.kind).collect()
    }

    #[test]
    fn test_paragraph_with_inline_formatting() {
        let tree = parse_markdown("Hello *big* **world**").unwrap();
        assert_eq!(tree.kind, NodeKind::Document);
        let paragraph = &tree.children[0];
        assert_eq!(
            kinds(paragraph),
            vec![
                &NodeKind::Text("Hello ".to_owned()),
                &NodeKind::Emphasis,
                &NodeKind::Text(" ".to_owned()),
                &NodeKind::Strong,
            ]
        );
    }

    #[test]
    fn test_soft_break_stays_in_text() {
        let tree = parse_markdown("one\ntwo").unwrap();
        assert_eq!(kinds(&tree.children[0]), vec![&NodeKind::Text("one\ntwo".to_owned())]);
    }

    #[test]
    fn test_hard_break_node() {
        let tree = parse_markdown("one  \ntwo").unwrap();
        assert_eq!(
            kinds(&tree.children[0]),
            vec![
                &NodeKind::Text("one".to_owned()),
                &NodeKind::HardBreak,
                &NodeKind::Text("\ntwo".to_owned()),
            ]
        );
    }

    #[test]
    fn test_heading_levels() {
        let tree = parse_markdown("# One\n\n### Three").unwrap();
        assert_eq!(
            kinds(&tree),
            vec![
                &NodeKind::Heading { level: 1 },
                &NodeKind::Heading { level: 3 }
            ]
        );
    }

    #[test]
    fn test_fenced_code_block() {
        let tree = parse_markdown("```bash title=x\necho hi\n```").unwrap();
        assert_eq!(
            tree.children[0].kind,
            NodeKind::CodeBlock {
                language: Some("bash".to_owned()),
                literal: "echo hi\n".to_owned(),
            }
        );
    }

    #[test]
    fn test_unlabeled_and_indented_code_blocks() {
        let tree = parse_markdown("```\nplain\n```\n\n    indented\n").unwrap();
        for child in &tree.children {
            assert!(matches!(
                child.kind,
                NodeKind::CodeBlock { language: None, .. }
            ));
        }
    }

    #[test]
    fn test_table_is_normalized() {
        let tree = parse_markdown("| A | B |\n|---|---|\n| 1 | 2 |").unwrap();
        let table = &tree.children[0];
        assert_eq!(table.kind, NodeKind::Table);
        assert_eq!(kinds(table), vec![&NodeKind::TableHead, &NodeKind::TableBody]);

        let head = &table.children[0];
        assert_eq!(kinds(head), vec![&NodeKind::TableRow]);
        assert_eq!(head.children[0].children.len(), 2);

        let body = &table.children[1];
        assert_eq!(kinds(body), vec![&NodeKind::TableRow]);
        assert_eq!(body.children[0].children[1].plain_text(), "2");
    }

    #[test]
    fn test_links_and_images() {
        let tree = parse_markdown("[docs](c.md) ![logo](a.png \"Logo\")").unwrap();
        let paragraph = &tree.children[0];
        assert_eq!(
            paragraph.children[0].kind,
            NodeKind::Link {
                destination: "c.md".to_owned(),
                title: String::new(),
            }
        );
        let image = &paragraph.children[2];
        assert_eq!(
            image.kind,
            NodeKind::Image {
                destination: "a.png".to_owned(),
                title: "Logo".to_owned(),
            }
        );
        assert_eq!(image.plain_text(), "logo");
    }

    #[test]
    fn test_html_block_and_inline_html() {
        let tree = parse_markdown("<div>\nraw\n</div>\n\nText <b>bold</b>").unwrap();
        assert_eq!(
            tree.children[0].kind,
            NodeKind::HtmlBlock("<div>\nraw\n</div>\n".to_owned())
        );
        assert_eq!(
            tree.children[1].children[1].kind,
            NodeKind::InlineHtml("<b>".to_owned())
        );
    }

    #[test]
    fn test_alert_blockquote() {
        let tree = parse_markdown("> [!WARNING]\n> Careful").unwrap();
        assert_eq!(
            tree.children[0].kind,
            NodeKind::BlockQuote {
                admonition: Some(Admonition::Warning)
            }
        );
    }

    #[test]
    fn test_ordered_list() {
        let tree = parse_markdown("3. three\n4. four").unwrap();
        assert_eq!(
            tree.children[0].kind,
            NodeKind::List {
                ordered: true,
                start: Some(3)
            }
        );
        assert_eq!(tree.children[0].children.len(), 2);
    }

    #[test]
    fn test_leaf_directive_becomes_macro() {
        let tree = parse_markdown("::toc{maxLevel=3}\n\n::info[Read this]{title=\"Note\"}").unwrap();

        let NodeKind::Macro { name, parameters } = &tree.children[0].kind else {
            panic!("expected macro, got {:?}", tree.children[0].kind);
        };
        assert_eq!(name, "toc");
        assert_eq!(parameters["maxLevel"], "3");
        assert!(tree.children[0].children.is_empty());

        let info = &tree.children[1];
        assert!(matches!(&info.kind, NodeKind::Macro { name, .. } if name == "info"));
        assert_eq!(info.plain_text(), "Read this");
    }

    #[test]
    fn test_directive_inside_sentence_is_text() {
        let tree = parse_markdown("See ::toc for details").unwrap();
        assert_eq!(tree.children[0].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_unsupported_event_is_an_error() {
        let events = vec![
            Event::Start(Tag::Paragraph),
            Event::InlineMath("x^2".into()),
            Event::End(TagEnd::Paragraph),
        ];
        let err = build_tree(events).unwrap_err();
        assert!(matches!(err, RenderError::UnknownNodeKind(kind) if kind == "inline math"));
    }

    #[test]
    fn test_footnotes_are_plain_text_without_extension() {
        let tree = parse_markdown("Claim[^1]").unwrap();
        assert_eq!(tree.children[0].kind, NodeKind::Paragraph);
    }
}
