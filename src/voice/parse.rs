use anyhow::{Context, Result};
use serde::Deserialize;

use super::graph::NodeKind;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawGraph {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub val: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawLink {
    pub source: RawEndpoint,
    pub target: RawEndpoint,
}

/// A link endpoint as it appears in the payload: a bare node id, or a node
/// object that a previous renderer already resolved in place.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawEndpoint {
    Id(String),
    Node { id: String },
}

impl RawEndpoint {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Node { id } => id,
        }
    }
}

pub(super) fn parse_graph_json(raw: &str) -> Result<RawGraph> {
    serde_json::from_str(raw).context("invalid voice graph JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_extractor_payload() {
        let raw = r#"{
            "nodes": [
                {"id": "Q1", "label": "Actor One", "type": "actor", "val": 5},
                {"id": "Q9", "label": "Some Show", "type": "work", "medium": "anime", "val": 3}
            ],
            "links": [{"source": "Q1", "target": "Q9"}]
        }"#;

        let graph = parse_graph_json(raw).expect("valid payload");
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1].kind, NodeKind::Work);
        assert_eq!(graph.nodes[1].medium.as_deref(), Some("anime"));
        assert_eq!(graph.links[0].source.id(), "Q1");
    }

    #[test]
    fn accepts_object_endpoints_with_extra_fields() {
        let raw = r#"{
            "nodes": [],
            "links": [{
                "source": {"id": "Q1", "label": "Actor One", "x": 1.5, "y": -2.0},
                "target": "Q9"
            }]
        }"#;

        let graph = parse_graph_json(raw).expect("valid payload");
        assert!(matches!(graph.links[0].source, RawEndpoint::Node { .. }));
        assert_eq!(graph.links[0].source.id(), "Q1");
        assert_eq!(graph.links[0].target.id(), "Q9");
    }

    #[test]
    fn missing_arrays_default_to_empty() {
        let graph = parse_graph_json("{}").expect("empty object is a valid graph");
        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());
    }

    #[test]
    fn rejects_unknown_node_type() {
        let raw = r#"{"nodes": [{"id": "Q1", "type": "studio"}]}"#;
        assert!(parse_graph_json(raw).is_err());
    }
}
