//! Shape generation for 2D primitives
//!
//! Entities are drawn as flat colored triangles in screen coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::EXPLOSION_FRAMES;
use crate::sim::{Entity, EntityKind, World};

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (dir1, dir2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Ship: swept hull pointing up with a cockpit
fn player(entity: &Entity) -> Vec<Vertex> {
    let c = entity.pos;
    let h = entity.half_size();
    let hull = colors::PLAYER_HULL;

    let mut vertices = vec![
        // Nose to wingtips
        Vertex::new(c.x, c.y + h.y, hull),
        Vertex::new(c.x - h.x, c.y - h.y, hull),
        Vertex::new(c.x + h.x, c.y - h.y, hull),
    ];
    vertices.extend(ellipse(
        c + Vec2::new(0.0, h.y * 0.15),
        h * Vec2::new(0.18, 0.3),
        colors::PLAYER_COCKPIT,
        10,
    ));
    vertices
}

/// Meteor: lumpy polygon, shape seeded by entity id
fn meteor(entity: &Entity) -> Vec<Vertex> {
    const SEGMENTS: u32 = 9;
    let c = entity.pos;
    let r = entity.half_size();
    let mut vertices = Vec::with_capacity((SEGMENTS * 3) as usize);

    let lump = |i: u32| {
        let hash = (entity.id.wrapping_mul(2654435761) ^ i.wrapping_mul(40503)) % 100;
        0.8 + hash as f32 * 0.002
    };

    for i in 0..SEGMENTS {
        let theta1 = (i as f32 / SEGMENTS as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / SEGMENTS as f32) * 2.0 * PI;
        let p1 = c + Vec2::from_angle(theta1) * r * lump(i);
        let p2 = c + Vec2::from_angle(theta2) * r * lump((i + 1) % SEGMENTS);

        vertices.push(Vertex::new(c.x, c.y, colors::METEOR));
        vertices.push(Vertex::new(p1.x, p1.y, colors::METEOR));
        vertices.push(Vertex::new(p2.x, p2.y, colors::METEOR));
    }
    vertices
}

/// Explosion: bright core inside an expanding, fading ring
fn explosion(entity: &Entity, animate: bool) -> Vec<Vertex> {
    let t = (entity.frame() as f32 / EXPLOSION_FRAMES as f32).clamp(0.0, 1.0);
    let max_radius = entity.half_size().x * 0.5;
    let fade = 1.0 - t;

    let radius = if animate { max_radius * (0.3 + 0.7 * t) } else { max_radius * 0.5 };

    let mut core = colors::EXPLOSION_CORE;
    core[3] *= fade;
    let mut outer = colors::EXPLOSION_RING;
    outer[3] *= fade;

    let mut vertices = ellipse(entity.pos, Vec2::splat(radius * 0.5), core, 16);
    vertices.extend(ring(entity.pos, radius * 0.6, radius, outer, 24));
    vertices
}

/// Vertices for one entity
pub fn entity_vertices(entity: &Entity, animate_explosions: bool) -> Vec<Vertex> {
    match entity.kind {
        EntityKind::Player => player(entity),
        EntityKind::Meteor => meteor(entity),
        EntityKind::Plasma => ellipse(entity.pos, entity.half_size(), colors::PLASMA, 20),
        EntityKind::Laser => {
            let h = entity.half_size();
            rect(entity.pos - h, entity.pos + h, colors::LASER)
        }
        EntityKind::Explosion { .. } => explosion(entity, animate_explosions),
    }
}

/// Vertices for the whole world in draw order
pub fn world_vertices(world: &World, animate_explosions: bool) -> Vec<Vertex> {
    world
        .iter()
        .flat_map(|entity| entity_vertices(entity, animate_explosions))
        .collect()
}
