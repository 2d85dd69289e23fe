//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod screen;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collides_with_any, collides_with_list};
pub use entity::{Entity, EntityKind};
pub use screen::{Key, LevelReport, Screen};
pub use session::Session;
pub use spawner::{HazardKind, HazardProfile, Spawner};
pub use state::{GameEvent, LevelOutcome, PlayState, Progression, World};
pub use tick::tick;
