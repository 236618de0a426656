//! Jay2D - entity physics and collision core for a small 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vectors, colliders, gravity, collision response)
//! - `settings`: Data-driven tuning loaded from JSON
//!
//! Rendering, input devices and asset loading live outside this crate. The
//! simulation only consumes semantic input booleans and a frame delta, and
//! exposes entity positions and sizes for whoever draws them.

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Entity, EntityKind, TickInput, Vector2, World, tick};

/// Simulation constants
pub mod consts {
    /// Reference rate (Hz) that gravity cadence is derived from
    pub const REFERENCE_TICK_RATE: u32 = 30;
    /// Frame delta (ms) at which one velocity unit moves one world unit
    pub const REFERENCE_DELTA_MS: f32 = 100.0;
    /// Maximum gravity steps per frame in fixed-step mode
    pub const MAX_GRAVITY_STEPS: u32 = 8;

    /// Velocity removed per gravity step, before scaling
    pub const GRAVITY_CONSTANT: f32 = 15.0;
    /// Terminal velocity per unit of gravity scale
    pub const TERMINAL_VELOCITY_FACTOR: f32 = 50.0;
    /// Default target gravity rate
    pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

    /// World dimensions (800x800 canvas centred on the origin)
    pub const WORLD_HALF_WIDTH: f32 = 400.0;
    pub const WORLD_HALF_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 20.0;
    pub const JUMP_FACTOR: f32 = 0.6;
    /// Horizontal decay per tick while grounded
    pub const GROUND_FRICTION: f32 = 10.0;
    /// Horizontal decay per tick while airborne
    pub const AIR_DRAG: f32 = 5.0;

    /// Velocity multiplier applied by trampolines
    pub const TRAMPOLINE_FACTOR: f32 = -1.5;
    /// Patrol speed of moving platforms
    pub const PLATFORM_SPEED: f32 = 10.0;

    /// Frame delta used when the caller has no clock (60 Hz)
    pub const DEFAULT_FRAME_DELTA_MS: f32 = 1000.0 / 60.0;
}
