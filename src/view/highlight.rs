use std::collections::HashSet;

use crate::voice::VoiceGraph;

/// Hover emphasis. Only affects styling, never which elements are drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightSet {
    pub nodes: HashSet<usize>,
    pub links: HashSet<usize>,
}

impl HighlightSet {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub fn contains_node(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }

    pub fn contains_link(&self, link: usize) -> bool {
        self.links.contains(&link)
    }
}

/// Built from scratch for every hover transition over the full graph's links.
pub fn build_highlight(graph: &VoiceGraph, hovered: Option<usize>) -> HighlightSet {
    let Some(hovered) = hovered else {
        return HighlightSet::default();
    };

    let mut highlight = HighlightSet::default();
    highlight.nodes.insert(hovered);

    for (index, link) in graph.links.iter().enumerate() {
        if link.touches(hovered) {
            highlight.links.insert(index);
            highlight.nodes.insert(link.source);
            highlight.nodes.insert(link.target);
        }
    }

    highlight
}
