use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::voice::VoiceGraph;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// First node, in graph order, whose label contains `query` ignoring case.
/// The query is taken as typed, so trailing spaces narrow the match.
pub fn find_first_match(graph: &VoiceGraph, query: &str) -> Option<usize> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return None;
    }

    graph
        .nodes
        .iter()
        .position(|node| node.label.to_lowercase().contains(&query))
}

/// Best fuzzy matches first; equal scores keep graph order.
pub fn fuzzy_suggestions(graph: &VoiceGraph, query: &str, limit: usize) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = graph
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            fuzzy_match_score(&matcher, &node.label, query).map(|score| (score, index))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, index)| index).collect()
}
