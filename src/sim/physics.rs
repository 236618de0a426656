//! Per-entity gravity integration
//!
//! Gravity runs at its own target rate, independent of how often the caller
//! ticks the simulation. Two gating strategies are available:
//! - `FrameModulo`: apply gravity every N-th simulation tick, where
//!   N = `REFERENCE_TICK_RATE / ticks_per_second`. Cheap, but the real gravity
//!   frequency drifts with the render frame rate.
//! - `FixedStep`: accumulate frame time and apply one gravity step per
//!   `1000 / ticks_per_second` ms, independent of frame rate.

use serde::{Deserialize, Serialize};

use super::vector::Vector2;
use crate::consts::*;

/// How gravity updates are gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityCadence {
    /// Every N-th simulation tick
    #[default]
    FrameModulo,
    /// Accumulated frame time
    FixedStep,
}

/// Ground contact flag with its value from the previous tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroundContact {
    previous: bool,
    current: bool,
}

impl GroundContact {
    /// Snapshot the current value as the previous one (start of tick)
    pub fn latch(&mut self) {
        self.previous = self.current;
    }

    /// Clear the current value before contacts are recomputed
    pub fn reset(&mut self) {
        self.current = false;
    }

    /// Accumulate a contact; once grounded this tick, stays grounded
    pub fn record(&mut self, touching: bool) {
        self.current |= touching;
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.current
    }

    #[inline]
    pub fn was_grounded(&self) -> bool {
        self.previous
    }

    /// True only on the tick the flag changed to `state`
    pub fn just_transitioned_to(&self, state: bool) -> bool {
        self.current == state && self.previous != state
    }
}

/// Gravity integrator owned by one active entity
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsComponent {
    ticks_per_second: u32,
    gravity_scale: f32,
    terminal_velocity: f32,
    cadence: GravityCadence,
    accumulator_ms: f32,
    contact: GroundContact,
}

impl PhysicsComponent {
    pub fn new(ticks_per_second: u32, gravity_scale: f32, cadence: GravityCadence) -> Self {
        Self {
            ticks_per_second: ticks_per_second.max(1),
            gravity_scale,
            terminal_velocity: gravity_scale * TERMINAL_VELOCITY_FACTOR,
            cadence,
            accumulator_ms: 0.0,
            contact: GroundContact::default(),
        }
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn terminal_velocity(&self) -> f32 {
        self.terminal_velocity
    }

    pub fn cadence(&self) -> GravityCadence {
        self.cadence
    }

    pub fn contact(&self) -> &GroundContact {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut GroundContact {
        &mut self.contact
    }

    /// Change gravity strength; terminal velocity follows
    pub fn set_gravity_scale(&mut self, gravity_scale: f32) {
        self.gravity_scale = gravity_scale;
        self.terminal_velocity = gravity_scale * TERMINAL_VELOCITY_FACTOR;
    }

    /// Simulation ticks between gravity steps in `FrameModulo` mode
    pub fn cadence_ticks(&self) -> u64 {
        u64::from((REFERENCE_TICK_RATE / self.ticks_per_second).max(1))
    }

    /// Number of gravity steps due this tick
    fn gravity_steps(&mut self, tick: u64, frame_delta_ms: f32) -> u32 {
        match self.cadence {
            GravityCadence::FrameModulo => u32::from(tick % self.cadence_ticks() == 0),
            GravityCadence::FixedStep => {
                let step_ms = 1000.0 / self.ticks_per_second as f32;
                self.accumulator_ms += frame_delta_ms.max(0.0);

                let mut steps = 0;
                while self.accumulator_ms >= step_ms && steps < MAX_GRAVITY_STEPS {
                    self.accumulator_ms -= step_ms;
                    steps += 1;
                }
                if steps == MAX_GRAVITY_STEPS && self.accumulator_ms >= step_ms {
                    // Frame hitch: drop the backlog instead of catching up later
                    log::trace!("gravity backlog dropped ({:.1} ms)", self.accumulator_ms);
                    self.accumulator_ms = 0.0;
                }
                steps
            }
        }
    }

    /// One gravity step: pull down unless grounded, never past terminal velocity
    pub fn apply_gravity(&self, velocity: Vector2) -> Vector2 {
        if self.contact.is_grounded() || velocity.y() <= -self.terminal_velocity {
            return velocity;
        }
        let vy = (velocity.y() - self.gravity_scale * GRAVITY_CONSTANT).max(-self.terminal_velocity);
        velocity.with_y(vy)
    }

    /// Start-of-tick update: latch the ground flag, then run any gravity due
    pub fn begin_tick(&mut self, velocity: Vector2, tick: u64, frame_delta_ms: f32) -> Vector2 {
        self.contact.latch();
        let steps = self.gravity_steps(tick, frame_delta_ms);
        (0..steps).fold(velocity, |v, _| self.apply_gravity(v))
    }

    /// End-of-tick update: stop vertical motion on the tick the entity lands
    pub fn settle_landing(&self, velocity: Vector2) -> Vector2 {
        if self.contact.just_transitioned_to(true) {
            velocity.with_y(0.0)
        } else {
            velocity
        }
    }
}
