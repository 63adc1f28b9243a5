use std::collections::HashMap;
use std::ops::{Add, Mul, Sub};

use eframe::egui::{Pos2, Rect, Vec2, vec2};

use crate::view::CameraSurface;

use super::RenderNode;
use super::render_utils::screen_to_world;

pub(super) const MIN_ZOOM: f32 = 0.05;
pub(super) const MAX_ZOOM: f32 = 6.0;

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug)]
struct Tween<T> {
    from: T,
    to: T,
    start_secs: f64,
    duration_secs: f64,
}

impl<T> Tween<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    fn fixed(value: T) -> Self {
        Self {
            from: value,
            to: value,
            start_secs: 0.0,
            duration_secs: 0.0,
        }
    }

    fn progress(&self, now: f64) -> f32 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        ((now - self.start_secs) / self.duration_secs).clamp(0.0, 1.0) as f32
    }

    fn value(&self, now: f64) -> T {
        let t = ease_out_cubic(self.progress(now));
        self.from + (self.to - self.from) * t
    }

    fn retarget(&mut self, to: T, now: f64, duration_secs: f64) {
        self.from = self.value(now);
        self.to = to;
        self.start_secs = now;
        self.duration_secs = duration_secs.max(0.0);
    }

    fn is_running(&self, now: f64) -> bool {
        self.progress(now) < 1.0
    }
}

/// World-space center and zoom, each animated independently so a center
/// command followed by a zoom command blend into one flight.
#[derive(Clone, Copy, Debug)]
pub(super) struct ViewCamera {
    center: Tween<Vec2>,
    zoom: Tween<f32>,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            center: Tween::fixed(Vec2::ZERO),
            zoom: Tween::fixed(1.0),
        }
    }
}

impl ViewCamera {
    pub(super) fn center(&self, now: f64) -> Vec2 {
        self.center.value(now)
    }

    pub(super) fn zoom(&self, now: f64) -> f32 {
        self.zoom.value(now)
    }

    pub(super) fn is_animating(&self, now: f64) -> bool {
        self.center.is_running(now) || self.zoom.is_running(now)
    }

    pub(super) fn fly_center(&mut self, target: Vec2, now: f64, duration_secs: f64) {
        self.center.retarget(target, now, duration_secs);
    }

    pub(super) fn fly_zoom(&mut self, level: f32, now: f64, duration_secs: f64) {
        self.zoom
            .retarget(level.clamp(MIN_ZOOM, MAX_ZOOM), now, duration_secs);
    }

    /// Drag panning is immediate and cancels any flight in progress.
    pub(super) fn pan_by(&mut self, screen_delta: Vec2, now: f64) {
        let zoom = self.zoom(now);
        let center = self.center(now) - screen_delta / zoom;
        self.center = Tween::fixed(center);
        self.zoom = Tween::fixed(zoom);
    }

    /// Zooms while keeping the world point under `pointer` fixed on screen.
    pub(super) fn zoom_about(&mut self, rect: Rect, pointer: Pos2, factor: f32, now: f64) {
        let zoom = self.zoom(now);
        let world_before = screen_to_world(rect, self.center(now), zoom, pointer);
        let next_zoom = (zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let center = world_before - (pointer - rect.center()) / next_zoom;

        self.center = Tween::fixed(center);
        self.zoom = Tween::fixed(next_zoom);
    }
}

/// The camera seen through the engine's [`CameraSurface`] for one frame.
pub(super) struct SurfaceCamera<'a> {
    pub(super) camera: &'a mut ViewCamera,
    pub(super) nodes: &'a [RenderNode],
    pub(super) index_by_node: &'a HashMap<usize, usize>,
    pub(super) viewport: Rect,
    pub(super) now: f64,
}

fn millis_to_secs(duration_ms: u32) -> f64 {
    f64::from(duration_ms) / 1000.0
}

impl CameraSurface for SurfaceCamera<'_> {
    fn node_position(&self, node: usize) -> Option<(f32, f32)> {
        let index = *self.index_by_node.get(&node)?;
        self.nodes
            .get(index)
            .map(|render_node| (render_node.world_pos.x, render_node.world_pos.y))
    }

    fn center_at(&mut self, x: f32, y: f32, duration_ms: u32) {
        self.camera
            .fly_center(vec2(x, y), self.now, millis_to_secs(duration_ms));
    }

    fn zoom(&mut self, level: f32, duration_ms: u32) {
        self.camera
            .fly_zoom(level, self.now, millis_to_secs(duration_ms));
    }

    fn zoom_to_fit(&mut self, duration_ms: u32, padding_px: f32) {
        let Some((min, max)) = world_bounds(self.nodes) else {
            return;
        };

        let size = (max - min).max(Vec2::splat(1.0));
        let available = (self.viewport.size() - Vec2::splat(padding_px * 2.0)).max(Vec2::splat(1.0));
        let zoom = (available.x / size.x).min(available.y / size.y);
        let duration_secs = millis_to_secs(duration_ms);

        self.camera
            .fly_center(min + (max - min) * 0.5, self.now, duration_secs);
        self.camera.fly_zoom(zoom, self.now, duration_secs);
    }
}

fn world_bounds(nodes: &[RenderNode]) -> Option<(Vec2, Vec2)> {
    let first = nodes.first()?;
    let mut min = first.world_pos;
    let mut max = first.world_pos;
    for node in nodes {
        let extent = Vec2::splat(node.base_radius);
        min = min.min(node.world_pos - extent);
        max = max.max(node.world_pos + extent);
    }
    Some((min, max))
}
