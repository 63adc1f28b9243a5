use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::physics::ALPHA_DRAG;
use super::super::render_utils::{circle_visible, screen_to_world};
use super::super::{RenderGraph, ViewModel};

/// Extra screen pixels around small nodes that still count as a hit.
const HIT_SLOP: f32 = 3.0;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        now: f64,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.camera.zoom_about(rect, pointer, zoom_factor, now);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response, now: f64) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.camera.pan_by(response.drag_delta(), now);
        }
    }

    /// Primary drag on a node holds it under the pointer until release.
    pub(in crate::app) fn handle_node_drag(
        &mut self,
        response: &egui::Response,
        rect: Rect,
        center: Vec2,
        zoom: f32,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            self.dragged_node = self.params.hovered;
        }
        let Some(node) = self.dragged_node else {
            return;
        };
        let Some(cache) = self.graph_cache.as_mut() else {
            self.dragged_node = None;
            return;
        };

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            Self::pin_node(cache, node, screen_to_world(rect, center, zoom, pointer));
        } else {
            Self::release_node(cache, node);
            self.dragged_node = None;
        }
    }

    fn pin_node(cache: &mut RenderGraph, node: usize, world: Vec2) {
        let Some(&render_index) = cache.index_by_node.get(&node) else {
            return;
        };
        let render_node = &mut cache.nodes[render_index];
        render_node.pinned = true;
        render_node.world_pos = world;
        render_node.velocity = Vec2::ZERO;
        cache.alpha = cache.alpha.max(ALPHA_DRAG);
    }

    fn release_node(cache: &mut RenderGraph, node: usize) {
        if let Some(&render_index) = cache.index_by_node.get(&node) {
            cache.nodes[render_index].pinned = false;
        }
    }

    pub(in crate::app) fn visible_indices_into(
        rect: Rect,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
        visible_indices: &mut Vec<usize>,
    ) {
        visible_indices.clear();
        visible_indices.extend(
            (0..screen_positions.len())
                .filter(|&index| circle_visible(rect, screen_positions[index], screen_radii[index])),
        );
    }

    /// Render index of the closest node under the pointer.
    pub(in crate::app) fn hovered_index(
        pointer: Option<Pos2>,
        visible_indices: &[usize],
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = pointer?;
        visible_indices
            .iter()
            .filter_map(|&index| {
                let distance = screen_positions[index].distance(pointer);
                (distance <= screen_radii[index] + HIT_SLOP).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::view::EngineConfig;
    use crate::voice::fixtures::*;

    #[test]
    fn dragged_node_is_pinned_and_reheats_the_layout() {
        let mut model = ViewModel::new(two_actor_graph(), EngineConfig::default());
        model.rebuild_render_graph();
        let a1 = idx(&model.graph, "A1");
        let Some(cache) = model.graph_cache.as_mut() else {
            panic!("render graph should exist");
        };
        cache.alpha = 0.0;

        ViewModel::pin_node(cache, a1, vec2(12.0, -8.0));
        let render_node = &cache.nodes[cache.index_by_node[&a1]];
        assert!(render_node.pinned);
        assert_eq!(render_node.world_pos, vec2(12.0, -8.0));
        assert_eq!(cache.alpha, ALPHA_DRAG);

        ViewModel::release_node(cache, a1);
        assert!(!cache.nodes[cache.index_by_node[&a1]].pinned);
    }

    #[test]
    fn pinning_a_hidden_node_changes_nothing() {
        let mut model = ViewModel::new(two_actor_graph(), EngineConfig::default());
        model.rebuild_render_graph();
        let Some(cache) = model.graph_cache.as_mut() else {
            panic!("render graph should exist");
        };
        cache.alpha = 0.0;

        ViewModel::pin_node(cache, usize::MAX, vec2(1.0, 1.0));
        assert!(cache.nodes.iter().all(|node| !node.pinned));
        assert_eq!(cache.alpha, 0.0);
    }

    #[test]
    fn hover_picks_the_closest_hit() {
        let positions = [Pos2::new(10.0, 10.0), Pos2::new(16.0, 10.0), Pos2::new(80.0, 80.0)];
        let radii = [5.0, 5.0, 5.0];

        let hovered = ViewModel::hovered_index(Some(Pos2::new(14.0, 10.0)), &[0, 1, 2], &positions, &radii);
        assert_eq!(hovered, Some(1));
    }

    #[test]
    fn hover_ignores_culled_and_distant_nodes() {
        let positions = [Pos2::new(10.0, 10.0), Pos2::new(80.0, 80.0)];
        let radii = [5.0, 5.0];

        assert_eq!(ViewModel::hovered_index(Some(Pos2::new(10.0, 10.0)), &[1], &positions, &radii), None);
        assert_eq!(ViewModel::hovered_index(Some(Pos2::new(40.0, 40.0)), &[0, 1], &positions, &radii), None);
        assert_eq!(ViewModel::hovered_index(None, &[0, 1], &positions, &radii), None);
    }

    #[test]
    fn culling_keeps_on_screen_nodes() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0));
        let positions = [Pos2::new(50.0, 50.0), Pos2::new(-40.0, 50.0), Pos2::new(102.0, 50.0)];
        let radii = [4.0, 4.0, 4.0];
        let mut visible = vec![9];

        ViewModel::visible_indices_into(rect, &positions, &radii, &mut visible);
        assert_eq!(visible, vec![0, 2]);
    }
}
