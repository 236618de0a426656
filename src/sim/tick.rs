//! Per-frame simulation tick
//!
//! One call advances the world by one frame. Order is fixed:
//! 1. every non-player entity updates itself (physics, motion, bounds)
//! 2. the player reads input, then gravity, motion, bounds, obstacle contacts
//!    (the landing settle runs inside the contact pass, ahead of the responses)
//!
//! Obstacles move first so the player is tested against their positions for
//! this tick.

use super::collision::dispatch_player_collisions;
use super::entity::Entity;
use super::state::World;
use crate::settings::PlayerTuning;

/// Semantic input state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Held jump keeps adding lift every tick (no debounce)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Move `value` toward zero by `step` without crossing it
#[inline]
fn decay_toward_zero(value: f32, step: f32) -> f32 {
    if value > 0.0 {
        (value - step).max(0.0)
    } else if value < 0.0 {
        (value + step).min(0.0)
    } else {
        value
    }
}

/// Map input onto the player's velocity
pub fn apply_controls(player: &mut Entity, input: &TickInput, tuning: &PlayerTuning) {
    let v = player.velocity;

    let vx = if input.move_left {
        -tuning.speed
    } else if input.move_right {
        tuning.speed
    } else if player.on_ground() {
        decay_toward_zero(v.x(), tuning.ground_friction)
    } else {
        decay_toward_zero(v.x(), tuning.air_drag)
    };

    let vy = if input.jump {
        v.y() + tuning.speed * tuning.jump_factor
    } else {
        v.y()
    };

    player.velocity = v.with_x(vx).with_y(vy);
}

/// Advance the world by one frame of `frame_delta_ms` milliseconds
pub fn tick(world: &mut World, input: &TickInput, frame_delta_ms: f32) {
    if input.pause {
        world.paused = !world.paused;
        log::info!(
            "Simulation {} at tick {}",
            if world.paused { "paused" } else { "resumed" },
            world.time_ticks
        );
    }
    if world.paused {
        return;
    }

    world.time_ticks += 1;
    let now = world.time_ticks;
    let bounds = world.bounds;

    for entity in &mut world.entities {
        entity.self_update(now, frame_delta_ms, &bounds);
    }

    let player = &mut world.player;
    apply_controls(player, input, &world.tuning);
    player.begin_physics(now, frame_delta_ms);
    player.integrate(frame_delta_ms);
    if player.collider().is_some() {
        player.clamp_to_bounds(&bounds);
    }
    dispatch_player_collisions(player, &world.entities);

    log::trace!("{}", world.debug_line());
}
