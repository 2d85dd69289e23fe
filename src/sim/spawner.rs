//! Timed hazard spawning
//!
//! Each spawner accumulates tick time and fires whenever the accumulator
//! crosses its period. Difficulty shortens the period and speeds up the
//! hazards it produces.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind};
use crate::consts::*;
use crate::tuning::{FloatRange, IntRange, Tuning};

/// Which hazard a spawner produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    Meteor,
    Plasma,
}

impl HazardKind {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            HazardKind::Meteor => EntityKind::Meteor,
            HazardKind::Plasma => EntityKind::Plasma,
        }
    }
}

/// Randomization envelope for one hazard type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardProfile {
    pub kind: HazardKind,
    pub base_scale: f32,
    pub scale_jitter: FloatRange,
    pub vx: IntRange,
    pub vy: IntRange,
}

impl HazardProfile {
    pub fn meteor(tuning: &Tuning) -> Self {
        Self {
            kind: HazardKind::Meteor,
            base_scale: tuning.meteor_scale,
            scale_jitter: tuning.meteor_scale_jitter,
            vx: tuning.meteor_vx,
            vy: tuning.meteor_vy,
        }
    }

    pub fn plasma(tuning: &Tuning) -> Self {
        Self {
            kind: HazardKind::Plasma,
            base_scale: tuning.plasma_scale,
            scale_jitter: tuning.plasma_scale_jitter,
            // Plasma clouds fall straight down
            vx: IntRange::new(0, 0),
            vy: tuning.plasma_vy,
        }
    }
}

/// Accumulator-driven hazard generator
#[derive(Debug, Clone)]
pub struct Spawner {
    pub profile: HazardProfile,
    /// Seconds between spawns
    pub period: f32,
    /// Multiplier applied to the randomized velocity
    pub velocity_factor: f32,
    accumulator: f32,
}

impl Spawner {
    /// `spawn_factor` divides the base period, so higher factors spawn faster
    pub fn new(profile: HazardProfile, base_period: f32, spawn_factor: f32, velocity_factor: f32) -> Self {
        Self {
            profile,
            period: base_period / spawn_factor,
            velocity_factor,
            accumulator: 0.0,
        }
    }

    /// Time accumulated toward the next spawn
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Advance by `dt` seconds and return how many hazards are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut due = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            due += 1;
        }
        due
    }

    /// Create one hazard just above the top edge
    pub fn spawn(&self, id: u32, rng: &mut Pcg32) -> Entity {
        let profile = &self.profile;
        let jitter = rng.random_range(profile.scale_jitter.min..profile.scale_jitter.max);
        let scale = profile.base_scale * jitter;

        let vx = rng.random_range(profile.vx.min..=profile.vx.max) as f32;
        let vy = rng.random_range(profile.vy.min..=profile.vy.max) as f32;
        let vel = Vec2::new(vx, vy) * self.velocity_factor;

        let screen_h = SCREEN_HEIGHT as i32;
        let bottom = rng.random_range(screen_h..=screen_h + SPAWN_BAND_HEIGHT) as f32;
        let left = rng.random_range(SPAWN_MARGIN_X..=SCREEN_WIDTH as i32 - SPAWN_MARGIN_X) as f32;

        let mut hazard = Entity::new(id, profile.kind.entity_kind(), Vec2::ZERO, scale).with_velocity(vel);
        hazard.set_bottom(bottom);
        hazard.set_left(left);
        hazard
    }
}
