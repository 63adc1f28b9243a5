use std::collections::HashSet;

use crate::voice::VoiceGraph;

use super::{MediumFilter, Subgraph};

/// Keeps works of one medium and the actors credited on them, in source order.
pub fn filter_by_medium(graph: &VoiceGraph, filter: &MediumFilter) -> Subgraph {
    let medium = match filter {
        MediumFilter::All => return Subgraph::full(graph),
        MediumFilter::Medium(medium) => medium.as_str(),
    };

    let valid_works = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_work() && node.medium.as_deref() == Some(medium))
        .map(|(index, _)| index)
        .collect::<HashSet<_>>();

    let links = graph
        .links
        .iter()
        .enumerate()
        .filter(|(_, link)| valid_works.contains(&link.target))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    let connected_actors = links
        .iter()
        .map(|&index| graph.links[index].source)
        .collect::<HashSet<_>>();

    let nodes = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(index, node)| {
            (node.is_work() && valid_works.contains(index))
                || (node.is_actor() && connected_actors.contains(index))
        })
        .map(|(index, _)| index)
        .collect();

    Subgraph { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::fixtures::*;

    #[test]
    fn all_is_identity() {
        let graph = two_actor_graph();
        assert_eq!(
            filter_by_medium(&graph, &MediumFilter::All),
            Subgraph::full(&graph)
        );
    }

    #[test]
    fn matching_medium_keeps_everything_in_order() {
        let graph = two_actor_graph();
        let filtered = filter_by_medium(&graph, &MediumFilter::Medium("anime".into()));

        assert_eq!(filtered, Subgraph::full(&graph));
    }

    #[test]
    fn unknown_medium_is_empty() {
        let graph = two_actor_graph();
        let filtered = filter_by_medium(&graph, &MediumFilter::Medium("game".into()));

        assert!(filtered.is_empty());
    }

    #[test]
    fn drops_actors_without_a_retained_credit() {
        let graph = graph(
            vec![
                actor("A1"),
                work("G1", "game"),
                actor("A2"),
                work("W1", "anime"),
            ],
            vec![link("A1", "G1"), link("A2", "W1"), link("A1", "W1")],
        );

        let filtered = filter_by_medium(&graph, &MediumFilter::Medium("game".into()));
        assert_eq!(filtered.nodes, vec![idx(&graph, "A1"), idx(&graph, "G1")]);
        assert_eq!(filtered.links, vec![0]);
    }

    #[test]
    fn medium_match_is_case_sensitive() {
        let graph = two_actor_graph();
        let filtered = filter_by_medium(&graph, &MediumFilter::Medium("Anime".into()));

        assert!(filtered.is_empty());
    }
}
