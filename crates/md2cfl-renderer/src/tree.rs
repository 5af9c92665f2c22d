//! Document tree consumed by the renderer and the destination collector.

use std::collections::BTreeMap;

use pulldown_cmark::BlockQuoteKind;

/// GitHub-style alert kind carried by a blockquote (`> [!NOTE]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Admonition {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl Admonition {
    /// Name of the Confluence macro used for this admonition.
    #[must_use]
    pub fn macro_name(self) -> &'static str {
        match self {
            Self::Note => "info",
            Self::Tip => "tip",
            Self::Important => "note",
            Self::Warning | Self::Caution => "warning",
        }
    }

    /// Default panel title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }
}

impl From<BlockQuoteKind> for Admonition {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Node kind. The set is closed: every kind is handled by the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    Document,
    Paragraph,
    /// Heading level 1 to 6.
    Heading {
        level: u8,
    },
    Emphasis,
    Strong,
    Strikethrough,
    Text(String),
    /// Inline code span.
    Code(String),
    CodeBlock {
        language: Option<String>,
        literal: String,
    },
    BlockQuote {
        admonition: Option<Admonition>,
    },
    List {
        ordered: bool,
        start: Option<u64>,
    },
    Item,
    Link {
        destination: String,
        title: String,
    },
    /// Image; children hold the alt text.
    Image {
        destination: String,
        title: String,
    },
    InlineHtml(String),
    HtmlBlock(String),
    HorizontalRule,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell,
    SoftBreak,
    HardBreak,
    /// Named custom block with string parameters; children form its body.
    Macro {
        name: String,
        parameters: BTreeMap<String, String>,
    },
}

impl NodeKind {
    /// Leaf kinds are visited once; all others get an enter and an exit visit.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Text(_)
                | Self::Code(_)
                | Self::CodeBlock { .. }
                | Self::InlineHtml(_)
                | Self::HtmlBlock(_)
                | Self::HorizontalRule
                | Self::SoftBreak
                | Self::HardBreak
        )
    }
}

/// Walk visit: entering or leaving a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    Enter,
    Exit,
}

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    /// Root node holding the given blocks.
    #[must_use]
    pub fn document(children: Vec<Node>) -> Self {
        Self::with_children(NodeKind::Document, children)
    }

    /// Text leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    /// Depth-first walk calling `visitor` on enter and exit of every node.
    ///
    /// Leaf kinds only receive [`Visit::Enter`].
    pub fn walk<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Node, Visit),
    {
        visitor(self, Visit::Enter);
        if self.kind.is_leaf() {
            return;
        }
        for child in &self.children {
            child.walk(visitor);
        }
        visitor(self, Visit::Exit);
    }

    /// Concatenated text of all descendant text and code leaves.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        self.walk(&mut |node, visit| {
            if visit == Visit::Enter {
                match &node.kind {
                    NodeKind::Text(t) | NodeKind::Code(t) => text.push_str(t),
                    _ => {}
                }
            }
        });
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::document(vec![Node::with_children(
            NodeKind::Paragraph,
            vec![
                Node::text("a "),
                Node::with_children(NodeKind::Strong, vec![Node::text("b")]),
                Node::new(NodeKind::Code("c".to_owned())),
            ],
        )])
    }

    #[test]
    fn test_walk_visits_containers_twice_and_leaves_once() {
        let mut visits = Vec::new();
        sample().walk(&mut |node, visit| {
            let name = match &node.kind {
                NodeKind::Document => "doc",
                NodeKind::Paragraph => "p",
                NodeKind::Strong => "strong",
                NodeKind::Text(_) => "text",
                NodeKind::Code(_) => "code",
                _ => "other",
            };
            visits.push((name, visit));
        });

        assert_eq!(
            visits,
            vec![
                ("doc", Visit::Enter),
                ("p", Visit::Enter),
                ("text", Visit::Enter),
                ("strong", Visit::Enter),
                ("text", Visit::Enter),
                ("strong", Visit::Exit),
                ("code", Visit::Enter),
                ("p", Visit::Exit),
                ("doc", Visit::Exit),
            ]
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sample().plain_text(), "a bc");
    }

    #[test]
    fn test_admonition_macro_names() {
        assert_eq!(Admonition::from(BlockQuoteKind::Note).macro_name(), "info");
        assert_eq!(Admonition::from(BlockQuoteKind::Tip).macro_name(), "tip");
        assert_eq!(Admonition::from(BlockQuoteKind::Caution).macro_name(), "warning");
    }
}
