//! Game state and core simulation types
//!
//! `Progression` survives level transitions; `PlayState` lives for exactly
//! one level attempt.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::spawner::{HazardProfile, Spawner};
use crate::consts::*;
use crate::tuning::Tuning;

/// Cross-level counters and difficulty factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Current level (1-based)
    pub level: u32,
    /// Seconds the current level lasts
    pub level_duration: f32,
    /// Multiplier on hazard velocity, grows every level
    pub level_factor: f32,
    /// Divisor on spawn periods, grows every level
    pub spawn_factor: f32,
    /// Meteors shot across all levels of this run
    pub total_score: u64,
}

impl Progression {
    /// Fresh run at level 1
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            level_duration: tuning.level_duration,
            level_factor: 1.0,
            spawn_factor: tuning.spawn_scale,
            total_score: 0,
        }
    }

    /// Back to level 1 after a game over
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Step up difficulty after a completed level
    pub fn advance_level(&mut self, tuning: &Tuning) {
        self.level += 1;
        self.level_factor *= tuning.level_factor;
        self.spawn_factor *= tuning.spawn_scale;
        self.level_duration += tuning.level_duration_step;
    }

    /// Highest level finished in this run
    pub fn levels_completed(&self) -> u32 {
        self.level.saturating_sub(1)
    }
}

/// Something that happened during a tick or input event.
///
/// The frontends turn these into sounds and log lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    LaserFired,
    /// A laser destroyed a meteor at `pos`
    MeteorDestroyed { pos: Vec2 },
    /// The player touched a hazard
    GameOver { time_taken: f32 },
    /// The level timer ran out with the player alive
    LevelComplete { time_taken: f32 },
    PauseToggled { paused: bool },
}

/// All entity collections. Each entity lives in exactly one of them.
#[derive(Debug, Clone)]
pub struct World {
    pub player: Entity,
    pub meteors: Vec<Entity>,
    pub plasma: Vec<Entity>,
    pub lasers: Vec<Entity>,
    pub explosions: Vec<Entity>,
}

impl World {
    /// Number of entities on screen, player included
    pub fn entity_count(&self) -> usize {
        1 + self.meteors.len() + self.plasma.len() + self.lasers.len() + self.explosions.len()
    }

    /// Iterate over every entity in draw order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.plasma
            .iter()
            .chain(self.meteors.iter())
            .chain(self.lasers.iter())
            .chain(std::iter::once(&self.player))
            .chain(self.explosions.iter())
    }
}

/// How a level attempt ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelOutcome {
    GameOver,
    LevelComplete,
}

/// State of one level attempt
#[derive(Debug, Clone)]
pub struct PlayState {
    pub world: World,
    /// Seconds since the level started (keeps running while paused)
    pub level_timer: f32,
    /// Seconds until the level is complete
    pub level_duration: f32,
    /// Hazard velocity multiplier for this level
    pub velocity_factor: f32,
    pub paused: bool,
    /// Meteors shot in this level
    pub score: u64,
    pub meteor_spawner: Spawner,
    pub plasma_spawner: Spawner,
    /// Set once the level has ended; no further ticks are processed
    pub outcome: Option<LevelOutcome>,
    pub tuning: Tuning,
    rng: Pcg32,
    next_id: u32,
}

impl PlayState {
    /// Start a level using the current progression
    pub fn new(progression: &Progression, tuning: &Tuning, seed: u64) -> Self {
        let velocity_factor = tuning.velocity_factor * progression.level_factor;

        let mut player = Entity::new(0, EntityKind::Player, Vec2::ZERO, tuning.player_scale);
        player.pos.x = SCREEN_WIDTH / 2.0;
        player.set_bottom(PLAYER_START_BOTTOM);

        Self {
            world: World {
                player,
                meteors: Vec::new(),
                plasma: Vec::new(),
                lasers: Vec::new(),
                explosions: Vec::new(),
            },
            level_timer: 0.0,
            level_duration: progression.level_duration,
            velocity_factor,
            paused: false,
            score: 0,
            meteor_spawner: Spawner::new(
                HazardProfile::meteor(tuning),
                tuning.meteor_period,
                progression.spawn_factor,
                velocity_factor,
            ),
            plasma_spawner: Spawner::new(
                HazardProfile::plasma(tuning),
                tuning.plasma_period,
                progression.spawn_factor,
                velocity_factor,
            ),
            outcome: None,
            tuning: tuning.clone(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Spawn a laser from the player's nose
    pub fn fire_laser(&mut self) {
        let id = self.next_entity_id();
        let player = &self.world.player;
        let mut laser = Entity::new(id, EntityKind::Laser, Vec2::ZERO, self.tuning.laser_scale)
            .with_velocity(Vec2::new(0.0, self.tuning.laser_speed));
        laser.pos.x = player.pos.x;
        laser.set_bottom(player.top());
        self.world.lasers.push(laser);
    }

    /// Spawn an explosion centered at `pos`, already on its first frame
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        let mut explosion = Entity::new(id, EntityKind::Explosion { frame: 0 }, pos, 1.0);
        explosion.advance_frame();
        self.world.explosions.push(explosion);
    }

    /// Run both spawners for `dt` seconds and add whatever they produce
    pub fn run_spawners(&mut self, dt: f32) {
        for _ in 0..self.meteor_spawner.advance(dt) {
            let id = self.next_entity_id();
            let meteor = self.meteor_spawner.spawn(id, &mut self.rng);
            self.world.meteors.push(meteor);
        }
        for _ in 0..self.plasma_spawner.advance(dt) {
            let id = self.next_entity_id();
            let plasma = self.plasma_spawner.spawn(id, &mut self.rng);
            self.world.plasma.push(plasma);
        }
    }
}
