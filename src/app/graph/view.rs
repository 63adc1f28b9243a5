use std::collections::HashMap;
use std::time::Duration;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, vec2};

use crate::view::SelectionOrigin;

use super::super::camera::SurfaceCamera;
use super::super::physics::step_physics;
use super::super::render_utils::{
    LABEL_ZOOM, LINK_COLOR, dim_color, draw_background, draw_glow, link_style, node_color,
    node_screen_radius, segment_visible, world_to_screen,
};
use super::super::{RenderGraph, RenderNode, ViewModel};

/// Fraction of a link a particle travels per second.
const PARTICLE_SPEED: f64 = 0.6;
const PARTICLE_RADIUS: f32 = 1.5;
const LABEL_GAP: f32 = 5.0;

impl ViewModel {
    fn update_screen_space(rect: Rect, center: egui::Vec2, zoom: f32, cache: &mut RenderGraph) {
        let scratch = &mut cache.view_scratch;
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        for render_node in &cache.nodes {
            scratch
                .screen_positions
                .push(world_to_screen(rect, center, zoom, render_node.world_pos));
            scratch
                .screen_radii
                .push(node_screen_radius(render_node.base_radius, zoom));
        }
    }

    /// Applies queued selection flights and any settle-delayed fits that
    /// are now due.
    fn drive_camera(&mut self, ctx: &egui::Context, rect: Rect, now: f64) {
        while let Some(command) = self.director.poll(now) {
            self.queued_camera.push(command);
        }

        if !self.queued_camera.is_empty() {
            let no_nodes = HashMap::new();
            let (nodes, index_by_node): (&[RenderNode], &HashMap<usize, usize>) =
                match &self.graph_cache {
                    Some(cache) => (cache.nodes.as_slice(), &cache.index_by_node),
                    None => (Default::default(), &no_nodes),
                };
            let mut surface = SurfaceCamera {
                camera: &mut self.camera,
                nodes,
                index_by_node,
                viewport: rect,
                now,
            };
            for command in self.queued_camera.drain(..) {
                command.apply(&mut surface);
            }
        }

        if let Some(deadline) = self.director.next_deadline() {
            ctx.request_repaint_after(Duration::from_secs_f64((deadline - now).max(0.0)));
        }
        if self.camera.is_animating(now) {
            ctx.request_repaint();
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let now = ui.input(|input| input.time);
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.handle_graph_zoom(ui, rect, &response, now);
        self.handle_graph_pan(&response, now);
        self.drive_camera(ui.ctx(), rect, now);

        let center = self.camera.center(now);
        let zoom = self.camera.zoom(now);
        draw_background(&painter, rect, center, zoom);

        let frame_delta_seconds = ui
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        let pointer = ui.input(|input| input.pointer.hover_pos());
        let pointer = pointer.filter(|position| rect.contains(*position));
        self.handle_node_drag(&response, rect, center, zoom);

        let Some(cache) = self.graph_cache.as_mut() else {
            self.visible_node_count = 0;
            self.visible_link_count = 0;
            self.set_hovered(None);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No nodes match the current filter.",
                FontId::proportional(15.0),
                Color32::from_gray(170),
            );
            return;
        };

        if self.live_physics && step_physics(cache, frame_delta_seconds) {
            ui.ctx().request_repaint();
        }
        if response.dragged() {
            ui.ctx().request_repaint();
        }

        Self::update_screen_space(rect, center, zoom, cache);
        Self::visible_indices_into(
            rect,
            &cache.view_scratch.screen_positions,
            &cache.view_scratch.screen_radii,
            &mut cache.view_scratch.visible_indices,
        );
        let hovered = Self::hovered_index(
            pointer,
            &cache.view_scratch.visible_indices,
            &cache.view_scratch.screen_positions,
            &cache.view_scratch.screen_radii,
        )
        .map(|index| cache.nodes[index].node);

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
        self.set_hovered(hovered);

        let clicked = response
            .clicked_by(egui::PointerButton::Primary)
            .then_some(hovered)
            .flatten();

        self.paint_graph(ui, &painter, rect, now, zoom);

        if let Some(node) = clicked {
            self.select_node(node, SelectionOrigin::Click, now);
        }
    }

    fn paint_graph(&mut self, ui: &Ui, painter: &egui::Painter, rect: Rect, now: f64, zoom: f32) {
        let Some(cache) = self.graph_cache.as_ref() else {
            return;
        };
        let scratch = &cache.view_scratch;
        let highlight_active = !self.highlight.is_empty();

        let mut drawn_links = 0usize;
        let mut particles_running = false;
        for render_link in &cache.links {
            let start = scratch.screen_positions[render_link.source];
            let end = scratch.screen_positions[render_link.target];
            if !segment_visible(rect, start, end, 2.0) {
                continue;
            }

            let highlighted = self.highlight.contains_link(render_link.link);
            let (width, particles) = link_style(highlighted);
            painter.line_segment([start, end], Stroke::new(width, LINK_COLOR));
            drawn_links += 1;

            for particle in 0..particles {
                let phase = (now * PARTICLE_SPEED + particle as f64 / particles as f64).fract();
                let position = start + (end - start) * phase as f32;
                painter.circle_filled(position, PARTICLE_RADIUS.max(width), Color32::from_gray(235));
                particles_running = true;
            }
        }

        let selected = self.params.selected;
        let hovered = self.params.hovered;
        for &index in &scratch.visible_indices {
            let render_node = &cache.nodes[index];
            let position = scratch.screen_positions[index];
            let radius = scratch.screen_radii[index];
            let is_highlighted = self.highlight.contains_node(render_node.node);
            let is_selected = selected == Some(render_node.node);
            let is_hovered = hovered == Some(render_node.node);

            let base_color = node_color(render_node.kind);
            let color = if highlight_active && !is_highlighted && !is_selected {
                dim_color(base_color, 0.55)
            } else {
                base_color
            };

            let glow = if is_highlighted || is_selected { 1.6 } else { 1.0 };
            draw_glow(painter, position, radius, color, glow);
            painter.circle_filled(position, radius, color);
            if is_selected {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.5, Color32::from_rgba_unmultiplied(255, 255, 255, 200)),
                );
            }

            if zoom > LABEL_ZOOM || is_selected || is_hovered {
                let label = self.graph.label(render_node.node).unwrap_or_default();
                painter.text(
                    position + vec2(0.0, radius + LABEL_GAP),
                    Align2::CENTER_TOP,
                    label,
                    FontId::proportional(12.0),
                    Color32::from_rgba_unmultiplied(255, 255, 255, 204),
                );
            }
        }

        if particles_running {
            ui.ctx().request_repaint();
        }

        if let Some(node) = hovered.and_then(|hovered| self.graph.node(hovered)) {
            let caption = match node.medium.as_deref() {
                Some(medium) => format!("{}  |  {}  |  {}", node.label, node.kind.label(), medium),
                None => format!("{}  |  {}", node.label, node.kind.label()),
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                caption,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        self.visible_node_count = scratch.visible_indices.len();
        self.visible_link_count = drawn_links;
    }
}
