//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here. Defaults reproduce the
//! classic balance; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive integer range used for randomized hazard velocities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Half-open float range used for randomized hazard scales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Levels ===
    /// Duration of level 1 (seconds)
    pub level_duration: f32,
    /// Seconds added to the duration for every completed level
    pub level_duration_step: f32,
    /// Base velocity multiplier applied to every hazard
    pub velocity_factor: f32,
    /// Per-level multiplier on the velocity factor
    pub level_factor: f32,
    /// Spawn-rate factor at level 1, and its per-level multiplier
    pub spawn_scale: f32,

    // === Spawning ===
    /// Base seconds between meteor spawns
    pub meteor_period: f32,
    /// Base seconds between plasma cloud spawns
    pub plasma_period: f32,

    // === Sprites ===
    pub player_scale: f32,
    pub laser_scale: f32,
    pub meteor_scale: f32,
    pub plasma_scale: f32,
    /// Random multiplier on `meteor_scale`
    pub meteor_scale_jitter: FloatRange,
    /// Random multiplier on `plasma_scale`
    pub plasma_scale_jitter: FloatRange,

    // === Velocities (pixels per tick, before the velocity factor) ===
    pub laser_speed: f32,
    pub meteor_vx: IntRange,
    pub meteor_vy: IntRange,
    pub plasma_vy: IntRange,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            level_duration: 20.0,
            level_duration_step: 5.0,
            velocity_factor: 0.6,
            level_factor: 1.1,
            spawn_scale: 1.01,

            meteor_period: 0.75,
            plasma_period: 1.5,

            player_scale: 0.5,
            laser_scale: 0.5,
            meteor_scale: 0.5,
            plasma_scale: 0.5,
            meteor_scale_jitter: FloatRange::new(0.5, 2.0),
            plasma_scale_jitter: FloatRange::new(0.5, 1.5),

            laser_speed: 5.0,
            meteor_vx: IntRange::new(-3, 3),
            meteor_vy: IntRange::new(-10, -5),
            plasma_vy: IntRange::new(-12, -10),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall or invert the simulation
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("level_duration", self.level_duration),
            ("velocity_factor", self.velocity_factor),
            ("level_factor", self.level_factor),
            ("spawn_scale", self.spawn_scale),
            ("meteor_period", self.meteor_period),
            ("plasma_period", self.plasma_period),
            ("player_scale", self.player_scale),
            ("laser_scale", self.laser_scale),
            ("meteor_scale", self.meteor_scale),
            ("plasma_scale", self.plasma_scale),
            ("laser_speed", self.laser_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidTuning {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        if !(self.level_duration_step.is_finite() && self.level_duration_step >= 0.0) {
            return Err(Error::InvalidTuning {
                field: "level_duration_step",
                reason: format!("must not be negative, got {}", self.level_duration_step),
            });
        }

        for (field, range) in [
            ("meteor_scale_jitter", self.meteor_scale_jitter),
            ("plasma_scale_jitter", self.plasma_scale_jitter),
        ] {
            if !(range.min > 0.0 && range.min < range.max && range.max.is_finite()) {
                return Err(Error::InvalidTuning {
                    field,
                    reason: format!("expected 0 < min < max < inf, got {}..{}", range.min, range.max),
                });
            }
        }

        for (field, range) in [
            ("meteor_vx", self.meteor_vx),
            ("meteor_vy", self.meteor_vy),
            ("plasma_vy", self.plasma_vy),
        ] {
            if range.min > range.max {
                return Err(Error::InvalidTuning {
                    field,
                    reason: format!("min {} exceeds max {}", range.min, range.max),
                });
            }
        }

        // Hazards must always fall, otherwise they never leave the screen
        for (field, range) in [("meteor_vy", self.meteor_vy), ("plasma_vy", self.plasma_vy)] {
            if range.max >= 0 {
                return Err(Error::InvalidTuning {
                    field,
                    reason: "vertical velocity must be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "level_duration": 30.0, "meteor_period": 0.5 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.level_duration, 30.0);
        assert_eq!(tuning.meteor_period, 0.5);
        assert_eq!(tuning.plasma_period, Tuning::default().plasma_period);
        assert_eq!(tuning.meteor_vy, IntRange::new(-10, -5));
    }

    #[test]
    fn test_rejects_non_positive_period() {
        let err = Tuning::from_json(r#"{ "meteor_period": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTuning {
                field: "meteor_period",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_rising_hazards() {
        let err = Tuning::from_json(r#"{ "plasma_vy": { "min": -2, "max": 1 } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning { field: "plasma_vy", .. }));
    }

    #[test]
    fn test_rejects_non_finite_jitter() {
        // 1e39 overflows f32 to infinity
        let err = Tuning::from_json(r#"{ "meteor_scale_jitter": { "min": 0.5, "max": 1e39 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTuning {
                field: "meteor_scale_jitter",
                ..
            }
        ));

        let tuning = Tuning {
            plasma_scale_jitter: FloatRange::new(0.5, f32::INFINITY),
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ level_duration: ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
