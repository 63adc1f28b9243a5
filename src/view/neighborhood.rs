use std::collections::HashSet;

use crate::voice::VoiceGraph;

use super::{FocusScope, Subgraph};

/// Two hops around `focus`: its credits, then every link on those credits.
///
/// The first hop only sees links that survived the medium filter. The second
/// hop reads from the full graph under [`FocusScope::FullGraph`], which lets a
/// focused work pull in its cast's credits from other mediums.
pub fn expand_neighborhood(
    graph: &VoiceGraph,
    filtered: &Subgraph,
    focus: usize,
    scope: FocusScope,
) -> Subgraph {
    let hop_ids = filtered
        .links
        .iter()
        .filter_map(|&index| graph.links.get(index))
        .filter_map(|link| link.other_end(focus))
        .collect::<HashSet<_>>();

    let touches_hop = |index: &usize| {
        graph
            .links
            .get(*index)
            .is_some_and(|link| hop_ids.contains(&link.source) || hop_ids.contains(&link.target))
    };
    let secondary_links = match scope {
        FocusScope::FullGraph => (0..graph.link_count()).filter(touches_hop).collect::<Vec<_>>(),
        FocusScope::WithinFilter => filtered
            .links
            .iter()
            .copied()
            .filter(touches_hop)
            .collect::<Vec<_>>(),
    };

    let mut neighbors = HashSet::with_capacity(hop_ids.len() + secondary_links.len() + 1);
    neighbors.insert(focus);
    neighbors.extend(hop_ids.iter().copied());
    for link in secondary_links.iter().map(|&index| graph.links[index]) {
        neighbors.insert(link.source);
        neighbors.insert(link.target);
    }

    let nodes = (0..graph.node_count())
        .filter(|index| neighbors.contains(index))
        .collect();

    Subgraph {
        nodes,
        links: secondary_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{MediumFilter, filter_by_medium};
    use crate::voice::fixtures::*;

    fn ids(graph: &VoiceGraph, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&index| graph.nodes[index].id.clone())
            .collect()
    }

    #[test]
    fn actor_focus_reaches_co_stars() {
        let graph = two_actor_graph();
        let full = Subgraph::full(&graph);

        let expanded = expand_neighborhood(&graph, &full, idx(&graph, "A1"), FocusScope::FullGraph);
        assert_eq!(ids(&graph, &expanded.nodes), vec!["A1", "A2", "W1", "W2"]);
        assert_eq!(expanded.links, vec![0, 1, 2]);
    }

    #[test]
    fn isolated_focus_is_kept() {
        let graph = graph(
            vec![actor("A1"), actor("Loner"), work("W1", "anime")],
            vec![link("A1", "W1")],
        );
        let full = Subgraph::full(&graph);

        let loner = idx(&graph, "Loner");
        let expanded = expand_neighborhood(&graph, &full, loner, FocusScope::FullGraph);
        assert_eq!(expanded.nodes, vec![loner]);
        assert!(expanded.links.is_empty());
    }

    #[test]
    fn work_focus_collects_cast_and_their_other_credits() {
        let graph = graph(
            vec![
                actor("A1"),
                actor("A2"),
                actor("A3"),
                work("W1", "anime"),
                work("W2", "anime"),
                work("W3", "anime"),
            ],
            vec![
                link("A1", "W1"),
                link("A2", "W1"),
                link("A2", "W2"),
                link("A3", "W3"),
            ],
        );
        let full = Subgraph::full(&graph);

        let expanded = expand_neighborhood(&graph, &full, idx(&graph, "W1"), FocusScope::FullGraph);
        assert_eq!(ids(&graph, &expanded.nodes), vec!["A1", "A2", "W1", "W2"]);
        assert_eq!(expanded.links, vec![0, 1, 2]);
    }

    fn mixed_medium_graph() -> VoiceGraph {
        graph(
            vec![
                actor("A1"),
                actor("A2"),
                work("W1", "anime"),
                work("G1", "game"),
            ],
            vec![link("A1", "W1"), link("A2", "W1"), link("A2", "G1")],
        )
    }

    #[test]
    fn full_graph_scope_crosses_the_medium_filter() {
        let graph = mixed_medium_graph();
        let filtered = filter_by_medium(&graph, &MediumFilter::Medium("anime".into()));

        let expanded =
            expand_neighborhood(&graph, &filtered, idx(&graph, "W1"), FocusScope::FullGraph);
        assert!(expanded.nodes.contains(&idx(&graph, "G1")));
        assert_eq!(expanded.links, vec![0, 1, 2]);
    }

    #[test]
    fn within_filter_scope_stays_inside_the_filter() {
        let graph = mixed_medium_graph();
        let filtered = filter_by_medium(&graph, &MediumFilter::Medium("anime".into()));

        let expanded =
            expand_neighborhood(&graph, &filtered, idx(&graph, "W1"), FocusScope::WithinFilter);
        assert_eq!(ids(&graph, &expanded.nodes), vec!["A1", "A2", "W1"]);
        assert_eq!(expanded.links, vec![0, 1]);
    }

    #[test]
    fn focus_outside_the_filter_shows_only_itself() {
        let graph = mixed_medium_graph();
        let filtered = filter_by_medium(&graph, &MediumFilter::Medium("anime".into()));

        let g1 = idx(&graph, "G1");
        let expanded = expand_neighborhood(&graph, &filtered, g1, FocusScope::FullGraph);
        assert_eq!(expanded.nodes, vec![g1]);
        assert!(expanded.links.is_empty());
    }
}
