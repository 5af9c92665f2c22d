//! Link and image destination collection.

use crate::tree::{Node, NodeKind, Visit};

/// Destination kind to collect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestinationKind {
    Image,
    Link,
}

/// Collect raw destinations of one kind in document order.
///
/// Destinations are returned as authored: not resolved, not deduplicated.
#[must_use]
pub fn collect_destinations(tree: &Node, kind: DestinationKind) -> Vec<String> {
    let mut destinations = Vec::new();
    tree.walk(&mut |node, visit| {
        if visit != Visit::Enter {
            return;
        }
        match (&node.kind, kind) {
            (NodeKind::Image { destination, .. }, DestinationKind::Image)
            | (NodeKind::Link { destination, .. }, DestinationKind::Link) => {
                destinations.push(destination.clone());
            }
            _ => {}
        }
    });
    destinations
}

/// Image and link destinations of a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Destinations {
    pub images: Vec<String>,
    pub links: Vec<String>,
}

impl Destinations {
    /// Collect both kinds.
    #[must_use]
    pub fn collect(tree: &Node) -> Self {
        Self {
            images: collect_destinations(tree, DestinationKind::Image),
            links: collect_destinations(tree, DestinationKind::Link),
        }
    }
}
