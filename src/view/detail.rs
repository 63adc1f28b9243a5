use std::collections::HashSet;

use crate::voice::{NodeKind, VoiceGraph};

pub const CREDIT_LIMIT: usize = 15;

/// Text for the details panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPayload {
    pub title: String,
    pub subtitle: String,
    pub heading: &'static str,
    pub items: Vec<String>,
    pub truncated: bool,
}

impl DetailPayload {
    pub fn summary(&self) -> String {
        let mut summary = self.items.join(", ");
        if self.truncated {
            summary.push_str("...");
        }
        summary
    }
}

pub fn resolve_detail(graph: &VoiceGraph, selected: usize) -> Option<DetailPayload> {
    let node = graph.node(selected)?;

    let (heading, items, truncated) = match node.kind {
        NodeKind::Actor => {
            let mut seen = HashSet::new();
            let mut credits = graph
                .links
                .iter()
                .filter(|link| link.source == selected)
                .filter_map(|link| graph.label(link.target))
                .filter(|label| seen.insert(*label))
                .map(str::to_owned)
                .collect::<Vec<_>>();
            let truncated = credits.len() > CREDIT_LIMIT;
            credits.truncate(CREDIT_LIMIT);
            ("Credits", credits, truncated)
        }
        NodeKind::Work => {
            let cast = graph
                .links
                .iter()
                .filter(|link| link.target == selected)
                .filter_map(|link| graph.label(link.source))
                .map(str::to_owned)
                .collect();
            ("Cast", cast, false)
        }
    };

    let subtitle = match (node.kind, node.medium.as_deref()) {
        (NodeKind::Work, Some(medium)) => medium.to_owned(),
        (kind, _) => kind.label().to_owned(),
    };

    Some(DetailPayload {
        title: node.label.clone(),
        subtitle,
        heading,
        items,
        truncated,
    })
}
