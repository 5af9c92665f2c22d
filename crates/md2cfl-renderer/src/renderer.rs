//! Tree walk shared by both markup dialects.
//!
//! # Architecture
//!
//! [`MarkupRenderer`] visits every node once on entry and once on exit (leaves
//! only on entry) and turns each node kind into [`Element`] open/close calls on
//! its [`MarkupDialect`]. Dialect-specific spelling lives entirely in the
//! dialect; the walk only tracks [`RenderContext`].

use std::marker::PhantomData;

use crate::dialect::{Element, Guard, MarkupDialect};
use crate::flags::RenderFlags;
use crate::format::Format;
use crate::storage::StorageDialect;
use crate::tree::{Admonition, Node, NodeKind};
use crate::wiki::WikiDialect;

/// Render `tree` in the given format.
#[must_use]
pub fn render(tree: &Node, format: Format, flags: RenderFlags) -> String {
    match format {
        Format::Wiki => MarkupRenderer::<WikiDialect>::new()
            .with_flags(flags)
            .render(tree),
        Format::Storage => MarkupRenderer::<StorageDialect>::new()
            .with_flags(flags)
            .render(tree),
    }
}

/// Walk-local state. A fresh context is created for every render call.
#[derive(Debug, Default)]
pub struct RenderContext {
    /// Set while inside a table head section.
    pub in_table_header: bool,
    /// Wiki bullet prefix of the innermost list (`*` or `#` per level).
    pub list_markers: String,
    /// Paragraphs render without block markers (inside list items and cells).
    pub compact: bool,
}

/// Markup renderer generic over the output dialect.
pub struct MarkupRenderer<D: MarkupDialect> {
    flags: RenderFlags,
    _dialect: PhantomData<D>,
}

impl<D: MarkupDialect> Default for MarkupRenderer<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: MarkupDialect> MarkupRenderer<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: RenderFlags::NONE,
            _dialect: PhantomData,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Render a tree to markup.
    #[must_use]
    pub fn render(&self, tree: &Node) -> String {
        let mut ctx = RenderContext::default();
        let mut out = String::new();
        self.node(tree, &mut ctx, &mut out);
        out
    }

    fn node(&self, node: &Node, ctx: &mut RenderContext, out: &mut String) {
        match &node.kind {
            NodeKind::Document | NodeKind::TableBody => self.children(node, ctx, out),
            NodeKind::Paragraph => {
                let element = Element::Paragraph {
                    compact: ctx.compact,
                };
                self.wrap(element, node, ctx, out);
            }
            NodeKind::Heading { level } => self.wrap(Element::Heading(*level), node, ctx, out),
            NodeKind::Emphasis => self.wrap(Element::Emphasis, node, ctx, out),
            NodeKind::Strong => self.wrap(Element::Strong, node, ctx, out),
            NodeKind::Strikethrough => self.wrap(Element::Strikethrough, node, ctx, out),
            NodeKind::Text(text) => self.text(text, out),
            NodeKind::Code(code) => {
                D::open(Element::InlineCode, out);
                self.text(code, out);
                D::close(Element::InlineCode, out);
            }
            NodeKind::CodeBlock { language, literal } => {
                // Blocks without a language are dropped.
                if let Some(language) = language {
                    code_macro::<D>(language, literal, out);
                }
            }
            NodeKind::BlockQuote { admonition } => {
                self.block_quote(*admonition, node, ctx, out);
            }
            NodeKind::List { ordered, start } => self.list(*ordered, *start, node, ctx, out),
            NodeKind::Item => {
                let marker = ctx.list_markers.clone();
                let element = Element::Item { marker: &marker };
                let compact = std::mem::replace(&mut ctx.compact, true);
                self.wrap(element, node, ctx, out);
                ctx.compact = compact;
            }
            NodeKind::Link { destination, .. } => {
                self.wrap(Element::Link(destination), node, ctx, out);
            }
            NodeKind::Image { destination, .. } => {
                // Alt text is not part of the image construct.
                D::open(Element::Image(destination), out);
                D::close(Element::Image(destination), out);
            }
            NodeKind::InlineHtml(html) => D::literal(html, out),
            NodeKind::HtmlBlock(html) => {
                D::open(Element::HtmlBlock, out);
                D::literal(html, out);
                D::close(Element::HtmlBlock, out);
            }
            NodeKind::HorizontalRule => {
                D::open(Element::HorizontalRule, out);
                D::close(Element::HorizontalRule, out);
            }
            NodeKind::Table => self.wrap(Element::Table, node, ctx, out),
            NodeKind::TableHead => {
                ctx.in_table_header = true;
                self.children(node, ctx, out);
                ctx.in_table_header = false;
            }
            NodeKind::TableRow => {
                let header = ctx.in_table_header;
                self.wrap(Element::TableRow { header }, node, ctx, out);
            }
            NodeKind::TableCell => {
                let header = ctx.in_table_header;
                let compact = std::mem::replace(&mut ctx.compact, true);
                self.wrap(Element::TableCell { header }, node, ctx, out);
                ctx.compact = compact;
            }
            NodeKind::SoftBreak | NodeKind::HardBreak => {}
            NodeKind::Macro { name, parameters } => {
                let has_body = !node.children.is_empty();
                let element = Element::Macro { name, has_body };
                D::open(element, out);
                for (index, (key, value)) in parameters.iter().enumerate() {
                    parameter::<D>(key, value, index, out);
                }
                if has_body {
                    self.rich_body(name, node, ctx, out);
                }
                D::close(element, out);
            }
        }
    }

    fn children(&self, node: &Node, ctx: &mut RenderContext, out: &mut String) {
        for child in &node.children {
            self.node(child, ctx, out);
        }
    }

    fn wrap(&self, element: Element<'_>, node: &Node, ctx: &mut RenderContext, out: &mut String) {
        D::open(element, out);
        self.children(node, ctx, out);
        D::close(element, out);
    }

    fn text(&self, text: &str, out: &mut String) {
        if D::FORMAT == Format::Wiki && self.flags.contains(RenderFlags::RAW_WIKI) {
            D::literal(text, out);
        } else {
            D::text(text, out);
        }
    }

    fn list(
        &self,
        ordered: bool,
        start: Option<u64>,
        node: &Node,
        ctx: &mut RenderContext,
        out: &mut String,
    ) {
        ctx.list_markers.push(if ordered { '#' } else { '*' });
        let element = Element::List {
            ordered,
            start,
            depth: ctx.list_markers.len(),
        };
        self.wrap(element, node, ctx, out);
        ctx.list_markers.pop();
    }

    fn block_quote(
        &self,
        admonition: Option<Admonition>,
        node: &Node,
        ctx: &mut RenderContext,
        out: &mut String,
    ) {
        let compact = std::mem::replace(&mut ctx.compact, false);
        match admonition {
            Some(admonition) if self.flags.contains(RenderFlags::ADMONITIONS) => {
                let name = admonition.macro_name();
                let element = Element::Macro {
                    name,
                    has_body: true,
                };
                D::open(element, out);
                parameter::<D>("title", admonition.title(), 0, out);
                self.rich_body(name, node, ctx, out);
                D::close(element, out);
            }
            _ => self.wrap(Element::BlockQuote, node, ctx, out),
        }
        ctx.compact = compact;
    }

    fn rich_body(&self, name: &str, node: &Node, ctx: &mut RenderContext, out: &mut String) {
        let compact = std::mem::replace(&mut ctx.compact, false);
        self.wrap(Element::RichBody { name }, node, ctx, out);
        ctx.compact = compact;
    }
}

fn parameter<D: MarkupDialect>(name: &str, value: &str, index: usize, out: &mut String) {
    let element = Element::Parameter { name, index };
    D::open(element, out);
    D::guarded(value, Guard::Parameter, out);
    D::close(element, out);
}

fn code_macro<D: MarkupDialect>(language: &str, literal: &str, out: &mut String) {
    let element = Element::Macro {
        name: "code",
        has_body: true,
    };
    D::open(element, out);
    parameter::<D>("language", language, 0, out);
    let body = Element::PlainBody { name: "code" };
    D::open(body, out);
    D::guarded(literal, Guard::Body, out);
    D::close(body, out);
    D::close(element, out);
}
