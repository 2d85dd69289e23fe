//! Moretini Invaders - a vertical space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, screens)
//! - `renderer`: WebGPU rendering of the world as colored quads
//! - `audio`: Sound effect mapping (Web Audio playback on wasm)
//! - `platform`: Browser key name mapping
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Velocities are expressed in pixels per tick.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the frontends feed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (origin bottom-left, y up)
    pub const SCREEN_WIDTH: f32 = 600.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;
    pub const SCREEN_TITLE: &str = "Moretini Invaders";

    /// Unscaled sprite sizes (w, h) in pixels
    pub const PLAYER_SPRITE: (f32, f32) = (99.0, 75.0);
    pub const METEOR_SPRITE: (f32, f32) = (43.0, 43.0);
    pub const PLASMA_SPRITE: (f32, f32) = (120.0, 100.0);
    pub const LASER_SPRITE: (f32, f32) = (9.0, 54.0);
    pub const EXPLOSION_SPRITE: (f32, f32) = (256.0, 256.0);

    /// Frames in the explosion animation
    pub const EXPLOSION_FRAMES: u32 = 60;

    /// Player steering speed (pixels per tick)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player bottom edge at session start
    pub const PLAYER_START_BOTTOM: f32 = 10.0;

    /// Hazards spawn with their bottom edge this far above the top, at most
    pub const SPAWN_BAND_HEIGHT: i32 = 80;
    /// Horizontal inset for hazard spawn positions
    pub const SPAWN_MARGIN_X: i32 = 10;
}
