//! Collision detection
//!
//! Everything collides as an axis-aligned box derived from its sprite size.

use glam::Vec2;

use super::entity::Entity;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_size: Vec2) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Strict overlap test; boxes that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Indices of every entity in `others` that overlaps `entity`, in list order
pub fn collides_with_list(entity: &Entity, others: &[Entity]) -> Vec<usize> {
    let bounds = entity.bounds();
    others
        .iter()
        .enumerate()
        .filter(|(_, other)| bounds.overlaps(&other.bounds()))
        .map(|(i, _)| i)
        .collect()
}

/// Whether `entity` overlaps anything in `others`
pub fn collides_with_any(entity: &Entity, others: &[Entity]) -> bool {
    let bounds = entity.bounds();
    others.iter().any(|other| bounds.overlaps(&other.bounds()))
}
