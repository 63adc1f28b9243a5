use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::voice::NodeKind;

pub(super) const ACTOR_COLOR: Color32 = Color32::from_rgb(0, 210, 255);
pub(super) const WORK_COLOR: Color32 = Color32::from_rgb(255, 0, 122);
pub(super) const LINK_COLOR: Color32 = Color32::from_rgba_premultiplied(26, 26, 26, 26);
pub(super) const BACKGROUND_COLOR: Color32 = Color32::from_rgb(11, 14, 20);

pub(super) const LINK_WIDTH: f32 = 1.0;
pub(super) const HIGHLIGHT_LINK_WIDTH: f32 = 2.0;
pub(super) const HIGHLIGHT_PARTICLES: usize = 4;
pub(super) const LABEL_ZOOM: f32 = 1.5;

pub(super) fn node_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Actor => ACTOR_COLOR,
        NodeKind::Work => WORK_COLOR,
    }
}

/// Width and directional particle count for a link.
pub(super) fn link_style(highlighted: bool) -> (f32, usize) {
    if highlighted {
        (HIGHLIGHT_LINK_WIDTH, HIGHLIGHT_PARTICLES)
    } else {
        (LINK_WIDTH, 0)
    }
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// Soft halo approximating a canvas shadow blur.
pub(super) fn draw_glow(painter: &Painter, position: Pos2, radius: f32, color: Color32, strength: f32) {
    for (scale, alpha) in [(2.4, 0.06), (1.8, 0.10), (1.35, 0.16)] {
        painter.circle_filled(position, radius * scale, with_alpha(color, alpha * strength));
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, center: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, BACKGROUND_COLOR);

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = world_to_screen(rect, center, zoom, Vec2::ZERO);
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(40, 48, 60, 50));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Cheap bounding-box test; long links crossing the viewport still count.
pub(super) fn segment_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, center: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + (world - center) * zoom
}

pub(super) fn screen_to_world(rect: Rect, center: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center()) / zoom + center
}

pub(super) fn node_screen_radius(base_radius: f32, zoom: f32) -> f32 {
    (base_radius * zoom).max(1.5)
}
