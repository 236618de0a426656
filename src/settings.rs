//! Simulation tuning
//!
//! Every field has a default matching the original demo, so a settings file
//! only needs to list the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Bounds, GravityCadence};

/// Settings loading / validation errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// World rectangle, centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            half_width: WORLD_HALF_WIDTH,
            half_height: WORLD_HALF_HEIGHT,
        }
    }
}

/// Gravity parameters for active entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Target gravity updates per second
    pub ticks_per_second: u32,
    pub gravity_scale: f32,
    pub cadence: GravityCadence,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            gravity_scale: 1.0,
            cadence: GravityCadence::FrameModulo,
        }
    }
}

/// Player control mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal speed while a direction is held
    pub speed: f32,
    /// Horizontal decay per tick on the ground
    pub ground_friction: f32,
    /// Horizontal decay per tick in the air
    pub air_drag: f32,
    /// Fraction of `speed` added upward per tick while jump is held
    pub jump_factor: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            ground_friction: GROUND_FRICTION,
            air_drag: AIR_DRAG,
            jump_factor: JUMP_FACTOR,
        }
    }
}

/// All simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldSettings,
    pub physics: PhysicsSettings,
    pub player: PlayerTuning,
    /// Patrol speed given to moving platforms without an explicit velocity
    pub platform_speed: f32,
    /// Frame delta used by headless runs (ms)
    pub frame_delta_ms: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldSettings::default(),
            physics: PhysicsSettings::default(),
            player: PlayerTuning::default(),
            platform_speed: PLATFORM_SPEED,
            frame_delta_ms: DEFAULT_FRAME_DELTA_MS,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!("must be zero or positive, got {value}"),
        })
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("world.half_width", self.world.half_width)?;
        positive("world.half_height", self.world.half_height)?;
        if self.physics.ticks_per_second == 0 {
            return Err(SettingsError::Invalid {
                field: "physics.ticks_per_second",
                reason: "must be at least 1".to_string(),
            });
        }
        non_negative("physics.gravity_scale", self.physics.gravity_scale)?;
        non_negative("player.speed", self.player.speed)?;
        non_negative("player.ground_friction", self.player.ground_friction)?;
        non_negative("player.air_drag", self.player.air_drag)?;
        non_negative("player.jump_factor", self.player.jump_factor)?;
        non_negative("platform_speed", self.platform_speed)?;
        positive("frame_delta_ms", self.frame_delta_ms)?;
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.world.half_width, self.world.half_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bounds(), Bounds::new(400.0, 400.0));
        assert_eq!(settings.physics.ticks_per_second, 10);
        assert_eq!(settings.player.speed, 20.0);
        assert_eq!(settings.platform_speed, 10.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{ "physics": { "cadence": "fixed_step" }, "player": { "speed": 30.0 } }"#,
        )
        .unwrap();
        assert_eq!(settings.physics.cadence, GravityCadence::FixedStep);
        assert_eq!(settings.physics.ticks_per_second, 10);
        assert_eq!(settings.player.speed, 30.0);
        assert_eq!(settings.player.jump_factor, 0.6);
        assert_eq!(settings.world, WorldSettings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.world.half_width = 640.0;
        let json = settings.to_json_pretty().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "physics": { "ticks_per_second": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "physics.ticks_per_second",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "world": { "half_width": -1.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("world.half_width"));

        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from_file("/nonexistent/jay2d-settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
