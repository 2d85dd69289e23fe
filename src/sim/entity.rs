//! Game entities
//!
//! One record type for everything on screen. The kind tag decides how an
//! entity moves, when it leaves the screen and how it is drawn.

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    /// Falling rock, destroyed by lasers
    Meteor,
    /// Falling cloud, cannot be shot
    Plasma,
    Laser,
    /// Animated burst; `frame` counts up until the animation is exhausted
    Explosion { frame: u32 },
}

impl EntityKind {
    /// Unscaled sprite size for this kind
    pub fn sprite_size(&self) -> Vec2 {
        let (w, h) = match self {
            EntityKind::Player => PLAYER_SPRITE,
            EntityKind::Meteor => METEOR_SPRITE,
            EntityKind::Plasma => PLASMA_SPRITE,
            EntityKind::Laser => LASER_SPRITE,
            EntityKind::Explosion { .. } => EXPLOSION_SPRITE,
        };
        Vec2::new(w, h)
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, EntityKind::Meteor | EntityKind::Plasma)
    }
}

/// A positioned, drawable game object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Center position
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Visual scale applied to the sprite size
    pub scale: f32,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, scale: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            scale,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Scaled width and height
    pub fn size(&self) -> Vec2 {
        self.kind.sprite_size() * self.scale
    }

    pub fn half_size(&self) -> Vec2 {
        self.size() / 2.0
    }

    /// Bounding box used for collision tests
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_size())
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.half_size().x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.half_size().x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.half_size().y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.half_size().y
    }

    pub fn set_left(&mut self, left: f32) {
        self.pos.x = left + self.half_size().x;
    }

    pub fn set_right(&mut self, right: f32) {
        self.pos.x = right - self.half_size().x;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.pos.y = bottom + self.half_size().y;
    }

    pub fn set_top(&mut self, top: f32) {
        self.pos.y = top - self.half_size().y;
    }

    /// Move by one tick of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Whether the entity has left the playfield for good.
    ///
    /// Hazards fall, so they are gone once fully below the bottom edge.
    /// Lasers fly up and are gone once fully above the top edge.
    pub fn is_off_screen(&self) -> bool {
        match self.kind {
            EntityKind::Meteor | EntityKind::Plasma => self.top() < 0.0,
            EntityKind::Laser => self.bottom() > SCREEN_HEIGHT,
            EntityKind::Player | EntityKind::Explosion { .. } => false,
        }
    }

    /// Step the explosion animation. Returns false once the last frame has
    /// been shown and the entity should be removed.
    pub fn advance_frame(&mut self) -> bool {
        match &mut self.kind {
            EntityKind::Explosion { frame } => {
                *frame += 1;
                *frame < EXPLOSION_FRAMES
            }
            _ => true,
        }
    }

    /// Current animation frame (0 for non-animated entities)
    pub fn frame(&self) -> u32 {
        match self.kind {
            EntityKind::Explosion { frame } => frame,
            _ => 0,
        }
    }

    /// Keep the entity fully inside the screen
    pub fn clamp_to_screen(&mut self) {
        if self.top() > SCREEN_HEIGHT {
            self.set_top(SCREEN_HEIGHT);
        }
        if self.right() > SCREEN_WIDTH {
            self.set_right(SCREEN_WIDTH);
        }
        if self.bottom() < 0.0 {
            self.set_bottom(0.0);
        }
        if self.left() < 0.0 {
            self.set_left(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_follow_scale() {
        let meteor = Entity::new(1, EntityKind::Meteor, Vec2::new(100.0, 200.0), 1.0);
        assert_eq!(meteor.left(), 100.0 - METEOR_SPRITE.0 / 2.0);
        assert_eq!(meteor.top(), 200.0 + METEOR_SPRITE.1 / 2.0);

        let small = Entity::new(2, EntityKind::Meteor, Vec2::new(100.0, 200.0), 0.5);
        assert_eq!(small.size(), Vec2::new(METEOR_SPRITE.0, METEOR_SPRITE.1) * 0.5);
    }

    #[test]
    fn test_edge_setters() {
        let mut laser = Entity::new(1, EntityKind::Laser, Vec2::ZERO, 1.0);
        laser.set_bottom(50.0);
        assert_eq!(laser.bottom(), 50.0);
        laser.set_left(10.0);
        assert_eq!(laser.left(), 10.0);
    }

    #[test]
    fn test_hazard_leaves_through_bottom() {
        let mut plasma = Entity::new(1, EntityKind::Plasma, Vec2::new(300.0, 10.0), 0.5);
        assert!(!plasma.is_off_screen());
        plasma.set_top(-0.5);
        assert!(plasma.is_off_screen());
    }

    #[test]
    fn test_laser_leaves_through_top() {
        let mut laser = Entity::new(1, EntityKind::Laser, Vec2::ZERO, 0.5);
        laser.set_bottom(SCREEN_HEIGHT);
        assert!(!laser.is_off_screen());
        laser.set_bottom(SCREEN_HEIGHT + 1.0);
        assert!(laser.is_off_screen());
    }

    #[test]
    fn test_explosion_frames_run_out() {
        let mut explosion = Entity::new(1, EntityKind::Explosion { frame: 0 }, Vec2::ZERO, 1.0);
        let mut alive_ticks = 0;
        while explosion.advance_frame() {
            alive_ticks += 1;
        }
        assert_eq!(alive_ticks, EXPLOSION_FRAMES - 1);
        assert_eq!(explosion.frame(), EXPLOSION_FRAMES);
    }

    #[test]
    fn test_clamp_to_screen() {
        let mut player = Entity::new(1, EntityKind::Player, Vec2::new(-20.0, 900.0), 0.5);
        player.clamp_to_screen();
        assert_eq!(player.left(), 0.0);
        assert_eq!(player.top(), SCREEN_HEIGHT);

        let mut player = Entity::new(1, EntityKind::Player, Vec2::new(700.0, -30.0), 0.5);
        player.clamp_to_screen();
        assert_eq!(player.right(), SCREEN_WIDTH);
        assert_eq!(player.bottom(), 0.0);
    }
}
