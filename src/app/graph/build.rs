use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};
use tracing::debug;

use crate::util::stable_pair;
use crate::view::derive_subgraph;
use crate::voice::Node;

use super::super::physics::ALPHA_START;
use super::super::{PhysicsScratch, RenderGraph, RenderLink, RenderNode, ViewModel, ViewScratch};

const SPAWN_SPREAD: f32 = 120.0;
const NEIGHBOR_SPREAD: f32 = 24.0;

fn make_render_node(index: usize, node: &Node, anchor: Option<Vec2>) -> RenderNode {
    let (jx, jy) = stable_pair(&node.id);
    let world_pos = match anchor {
        Some(anchor) => anchor + vec2(jx, jy) * NEIGHBOR_SPREAD,
        None => vec2(jx, jy) * SPAWN_SPREAD,
    };

    RenderNode {
        node: index,
        kind: node.kind,
        world_pos,
        velocity: Vec2::ZERO,
        base_radius: node.val,
        pinned: false,
    }
}

impl ViewModel {
    /// Re-derives the visible subgraph. Nodes that stay visible keep their
    /// layout state; newcomers spawn around the focused node when it has one.
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        self.graph_dirty = false;
        let subgraph = derive_subgraph(&self.graph, &self.params, self.engine.focus_scope);

        let (mut prior_nodes, scratch) = match self.graph_cache.take() {
            Some(cache) => (
                cache
                    .nodes
                    .into_iter()
                    .map(|node| (node.node, node))
                    .collect::<HashMap<_, _>>(),
                Some((cache.physics_scratch, cache.view_scratch)),
            ),
            None => (HashMap::new(), None),
        };

        if subgraph.is_empty() {
            self.visible_node_count = 0;
            self.visible_link_count = 0;
            return;
        }

        let anchor = self
            .params
            .focus
            .and_then(|focus| prior_nodes.get(&focus))
            .map(|node| node.world_pos);
        let reused = subgraph
            .nodes
            .iter()
            .filter(|&&index| prior_nodes.contains_key(&index))
            .count();

        let nodes = subgraph
            .nodes
            .iter()
            .filter_map(|&index| {
                let node = self.graph.node(index)?;
                Some(
                    prior_nodes
                        .remove(&index)
                        .unwrap_or_else(|| make_render_node(index, node, anchor)),
                )
            })
            .collect::<Vec<_>>();

        let index_by_node = nodes
            .iter()
            .enumerate()
            .map(|(render_index, node)| (node.node, render_index))
            .collect::<HashMap<_, _>>();

        let links = subgraph
            .links
            .iter()
            .filter_map(|&link| {
                let canonical = self.graph.links.get(link)?;
                Some(RenderLink {
                    link,
                    source: *index_by_node.get(&canonical.source)?,
                    target: *index_by_node.get(&canonical.target)?,
                })
            })
            .collect::<Vec<_>>();

        let (physics_scratch, view_scratch) = scratch.unwrap_or_else(|| {
            (
                PhysicsScratch {
                    positions: Vec::new(),
                    forces: Vec::new(),
                    degrees: Vec::new(),
                },
                ViewScratch {
                    screen_positions: Vec::new(),
                    screen_radii: Vec::new(),
                    visible_indices: Vec::new(),
                },
            )
        });

        debug!(
            nodes = nodes.len(),
            links = links.len(),
            reused,
            "rebuilt render graph"
        );

        self.visible_node_count = nodes.len();
        self.visible_link_count = links.len();
        self.graph_cache = Some(RenderGraph {
            nodes,
            alpha: ALPHA_START,
            links,
            index_by_node,
            physics_scratch,
            view_scratch,
        });
    }
}
