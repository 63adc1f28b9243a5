mod quadtree;

use eframe::egui::{Vec2, vec2};

use super::RenderGraph;
use quadtree::QuadNode;

pub(super) const ALPHA_START: f32 = 1.0;
/// Floor a dragged node keeps the layout warm at.
pub(super) const ALPHA_DRAG: f32 = 0.3;
const ALPHA_MIN: f32 = 0.001;
/// Cools from 1.0 to `ALPHA_MIN` in roughly 340 ticks.
const ALPHA_DECAY: f32 = 0.02;
const VELOCITY_DECAY: f32 = 0.3;
const CHARGE_STRENGTH: f32 = -30.0;
const BARNES_HUT_THETA: f32 = 0.9;
const MIN_DISTANCE_SQ: f32 = 1.0;
const LINK_DISTANCE: f32 = 30.0;
const MAX_TICKS_PER_FRAME: f32 = 3.0;

/// Advances the layout by the ticks owed for `delta_seconds` at 60 Hz.
/// Returns whether the simulation is still warm.
pub(super) fn step_physics(cache: &mut RenderGraph, delta_seconds: f32) -> bool {
    if cache.alpha < ALPHA_MIN {
        return false;
    }

    let ticks = (delta_seconds * 60.0).round().clamp(1.0, MAX_TICKS_PER_FRAME) as usize;
    for _ in 0..ticks {
        tick(cache);
        if cache.alpha < ALPHA_MIN {
            break;
        }
    }
    cache.alpha >= ALPHA_MIN
}

fn tick(cache: &mut RenderGraph) {
    cache.alpha += (0.0 - cache.alpha) * ALPHA_DECAY;
    let alpha = cache.alpha;
    let node_count = cache.nodes.len();
    if node_count == 0 {
        return;
    }

    let scratch = &mut cache.physics_scratch;
    scratch.positions.clear();
    scratch
        .positions
        .extend(cache.nodes.iter().map(|node| node.world_pos));
    scratch.forces.clear();
    scratch.forces.resize(node_count, Vec2::ZERO);
    scratch.degrees.clear();
    scratch.degrees.resize(node_count, 0);
    for link in &cache.links {
        scratch.degrees[link.source] += 1;
        scratch.degrees[link.target] += 1;
    }

    let positions = &scratch.positions;
    let forces = &mut scratch.forces;
    let degrees = &scratch.degrees;

    if let Some(tree) = QuadNode::build(positions) {
        let strength = CHARGE_STRENGTH * alpha;
        for (index, force) in forces.iter_mut().enumerate() {
            accumulate_charge(&tree, index, positions, strength, BARNES_HUT_THETA, force);
        }
    }

    for (index, node) in cache.nodes.iter_mut().enumerate() {
        node.velocity += forces[index];
    }

    for link in &cache.links {
        let (source, target) = (link.source, link.target);
        if source == target {
            continue;
        }

        let source_next = cache.nodes[source].world_pos + cache.nodes[source].velocity;
        let target_next = cache.nodes[target].world_pos + cache.nodes[target].velocity;
        let mut delta = target_next - source_next;
        if delta.length_sq() <= f32::EPSILON {
            delta = jiggle(source, target);
        }
        let distance = delta.length();

        let source_degree = degrees[source].max(1) as f32;
        let target_degree = degrees[target].max(1) as f32;
        let strength = 1.0 / source_degree.min(target_degree);
        let bias = source_degree / (source_degree + target_degree);
        let correction = delta * ((distance - LINK_DISTANCE) / distance * alpha * strength);

        cache.nodes[target].velocity -= correction * bias;
        cache.nodes[source].velocity += correction * (1.0 - bias);
    }

    let mut centroid = Vec2::ZERO;
    let mut any_pinned = false;
    for node in &mut cache.nodes {
        if node.pinned {
            node.velocity = Vec2::ZERO;
            any_pinned = true;
        } else {
            node.velocity *= 1.0 - VELOCITY_DECAY;
            node.world_pos += node.velocity;
        }
        centroid += node.world_pos;
    }

    // Recentering under a held node would slide it away from the pointer.
    if any_pinned {
        return;
    }
    centroid /= node_count as f32;
    for node in &mut cache.nodes {
        node.world_pos -= centroid;
    }
}

/// Charge on `index` from everything under `quad`. Cells that look small
/// from the node (side / distance below `theta`) act as one point at their
/// center of mass.
fn accumulate_charge(
    quad: &QuadNode,
    index: usize,
    positions: &[Vec2],
    strength: f32,
    theta: f32,
    force: &mut Vec2,
) {
    let point = positions[index];

    if quad.is_leaf() {
        for &other in &quad.indices {
            if other == index {
                continue;
            }
            let mut delta = positions[other] - point;
            if delta.length_sq() <= f32::EPSILON {
                let nudge = jiggle(index.min(other), index.max(other));
                delta = if index < other { nudge } else { -nudge };
            }
            *force += delta * (strength / clamp_distance_sq(delta.length_sq()));
        }
        return;
    }

    let delta = quad.center_of_mass - point;
    let distance_sq = delta.length_sq();
    let side = quad.bounds.side_length();
    if !quad.bounds.contains(point) && side * side < theta * theta * distance_sq {
        *force += delta * (strength * quad.mass / clamp_distance_sq(distance_sq));
        return;
    }

    for child in quad.children.iter().flatten() {
        accumulate_charge(child, index, positions, strength, theta, force);
    }
}

fn clamp_distance_sq(distance_sq: f32) -> f32 {
    if distance_sq < MIN_DISTANCE_SQ {
        (MIN_DISTANCE_SQ * distance_sq).sqrt()
    } else {
        distance_sq
    }
}

/// Deterministic nudge for coincident points.
fn jiggle(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin()) * 1e-3
}
