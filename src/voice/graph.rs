use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;
use tracing::warn;

use super::parse::{RawGraph, RawNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Actor,
    Work,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Actor => "Voice Actor",
            Self::Work => "Work",
        }
    }

    fn default_val(self) -> f32 {
        match self {
            Self::Actor => 5.0,
            Self::Work => 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub medium: Option<String>,
    pub val: f32,
}

impl Node {
    pub fn is_actor(&self) -> bool {
        self.kind == NodeKind::Actor
    }

    pub fn is_work(&self) -> bool {
        self.kind == NodeKind::Work
    }

    fn from_raw(raw: RawNode) -> Self {
        let medium = match raw.kind {
            NodeKind::Work => raw.medium.filter(|medium| !medium.is_empty()),
            NodeKind::Actor => None,
        };

        Self {
            label: raw.label.unwrap_or_else(|| raw.id.clone()),
            val: raw
                .val
                .filter(|val| val.is_finite() && *val > 0.0)
                .unwrap_or_else(|| raw.kind.default_val()),
            id: raw.id,
            kind: raw.kind,
            medium,
        }
    }
}

/// Link endpoints are indices into [`VoiceGraph::nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

impl Link {
    pub fn touches(&self, node: usize) -> bool {
        self.source == node || self.target == node
    }

    /// The endpoint that is not `node`, or `None` when the link does not touch it.
    pub fn other_end(&self, node: usize) -> Option<usize> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

/// The canonical graph, loaded once and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct VoiceGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub dropped_links: usize,
}

impl VoiceGraph {
    /// Resolves every link endpoint to a node index once, so nothing downstream
    /// has to care whether the payload used ids or node objects.
    pub fn from_raw(raw: RawGraph) -> Self {
        let mut nodes = Vec::with_capacity(raw.nodes.len());
        let mut index_by_id = HashMap::with_capacity(raw.nodes.len());

        for raw_node in raw.nodes {
            if index_by_id.contains_key(&raw_node.id) {
                warn!(id = %raw_node.id, "duplicate node id in graph payload, keeping the first");
                continue;
            }
            index_by_id.insert(raw_node.id.clone(), nodes.len());
            nodes.push(Node::from_raw(raw_node));
        }

        let mut links = Vec::with_capacity(raw.links.len());
        let mut dropped_links = 0usize;
        for raw_link in raw.links {
            let source = index_by_id.get(raw_link.source.id()).copied();
            let target = index_by_id.get(raw_link.target.id()).copied();
            match (source, target) {
                (Some(source), Some(target)) => links.push(Link { source, target }),
                _ => dropped_links += 1,
            }
        }

        if dropped_links > 0 {
            warn!(dropped_links, "dropped links with unknown endpoints");
        }

        Self {
            nodes,
            links,
            dropped_links,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(|node| node.label.as_str())
    }

    /// Distinct work mediums, sorted, for building the filter controls.
    pub fn mediums(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter_map(|node| node.medium.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::voice::parse::{RawEndpoint, RawLink};

    #[test]
    fn resolves_id_and_object_endpoints_to_the_same_node() {
        let graph = graph(
            vec![actor("A1"), work("W1", "game")],
            vec![
                link("A1", "W1"),
                RawLink {
                    source: RawEndpoint::Node { id: "A1".into() },
                    target: RawEndpoint::Node { id: "W1".into() },
                },
            ],
        );

        assert_eq!(graph.links[0], graph.links[1]);
        assert_eq!(graph.links[0].source, idx(&graph, "A1"));
        assert_eq!(graph.links[0].target, idx(&graph, "W1"));
    }

    #[test]
    fn drops_links_with_unknown_endpoints() {
        let graph = graph(
            vec![actor("A1"), work("W1", "game")],
            vec![link("A1", "W1"), link("A1", "missing"), link("ghost", "W1")],
        );

        assert_eq!(graph.link_count(), 1);
        assert_eq!(graph.dropped_links, 2);
    }

    #[test]
    fn keeps_first_node_on_duplicate_id() {
        let mut second = actor("A1");
        second.label = Some("Impostor".into());
        let graph = graph(vec![actor("A1"), second], Vec::new());

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.label(0), Some("A1"));
    }

    #[test]
    fn fills_defaults_and_ignores_actor_medium() {
        let mut odd_actor = actor("A1");
        odd_actor.label = None;
        odd_actor.medium = Some("anime".into());
        let graph = graph(vec![odd_actor, work("W1", "game")], Vec::new());

        let actor = graph.node(0).expect("actor");
        assert_eq!(actor.label, "A1");
        assert_eq!(actor.medium, None);
        assert_eq!(actor.val, 5.0);
        assert_eq!(graph.node(1).map(|work| work.val), Some(3.0));
    }

    #[test]
    fn lists_distinct_mediums_sorted() {
        let graph = graph(
            vec![work("W1", "game"), work("W2", "anime"), work("W3", "game")],
            Vec::new(),
        );

        assert_eq!(graph.mediums(), vec!["anime".to_owned(), "game".to_owned()]);
    }

    #[test]
    fn other_end_handles_both_directions() {
        let link = Link {
            source: 0,
            target: 3,
        };
        assert_eq!(link.other_end(0), Some(3));
        assert_eq!(link.other_end(3), Some(0));
        assert_eq!(link.other_end(1), None);
    }
}
