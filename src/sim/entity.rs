//! Simulation entities and world bounds

use serde::{Deserialize, Serialize};

use super::collider::Collider;
use super::physics::PhysicsComponent;
use super::vector::Vector2;
use crate::consts::REFERENCE_DELTA_MS;

/// What an entity does when the player touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Scenery: moves and clamps, but never reacts to the player
    #[default]
    None,
    /// Solid block; repels the player on landing
    Obstacle,
    /// Launches the player back the way it came
    Trampoline,
    /// Obstacle that patrols horizontally between the world edges
    MovingPlatform,
    /// The controlled entity; always the one probing for contacts
    Player,
}

impl EntityKind {
    /// Kinds the collision dispatcher responds to
    pub fn is_obstacle(self) -> bool {
        match self {
            EntityKind::Obstacle | EntityKind::Trampoline | EntityKind::MovingPlatform => true,
            EntityKind::None | EntityKind::Player => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::None => "none",
            EntityKind::Obstacle => "obstacle",
            EntityKind::Trampoline => "trampoline",
            EntityKind::MovingPlatform => "moving_platform",
            EntityKind::Player => "player",
        }
    }
}

/// Axis-aligned world rectangle centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl Bounds {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_width,
            half_height,
        }
    }

    #[inline]
    pub fn min(&self) -> Vector2 {
        Vector2::new(-self.half_width, -self.half_height)
    }

    #[inline]
    pub fn max(&self) -> Vector2 {
        Vector2::new(self.half_width, self.half_height)
    }

    /// Whether a box with the given half extents fits inside
    pub fn fits(&self, half_size: Vector2) -> bool {
        half_size.x() <= self.half_width && half_size.y() <= self.half_height
    }

    /// Whether a box at `position` lies fully inside (edges inclusive)
    pub fn contains(&self, position: Vector2, half_size: Vector2) -> bool {
        position.x() >= -self.half_width + half_size.x()
            && position.x() <= self.half_width - half_size.x()
            && position.y() >= -self.half_height + half_size.y()
            && position.y() <= self.half_height - half_size.y()
    }
}

/// Outcome of clamping one axis
#[derive(Debug, Clone, Copy)]
struct AxisClamp {
    position: f32,
    velocity: f32,
    hit: bool,
}

/// Clamp a coordinate into `[min + half, max - half]`.
///
/// On contact the velocity is zeroed, or negated when `reflect` is set.
fn clamp_axis(position: f32, velocity: f32, min: f32, max: f32, half: f32, reflect: bool) -> AxisClamp {
    let bounced = if reflect { -velocity } else { 0.0 };
    if position > max - half {
        AxisClamp {
            position: max - half,
            velocity: bounced,
            hit: true,
        }
    } else if position < min + half {
        AxisClamp {
            position: min + half,
            velocity: bounced,
            hit: true,
        }
    } else {
        AxisClamp {
            position,
            velocity,
            hit: false,
        }
    }
}

/// A simulated object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub position: Vector2,
    pub velocity: Vector2,
    size: Vector2,
    half_size: Vector2,
    collider: Option<Collider>,
    /// Present iff the entity is active (dynamic)
    physics: Option<PhysicsComponent>,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, position: Vector2, size: Vector2) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: Vector2::ZERO,
            size,
            half_size: size / 2.0,
            collider: None,
            physics: None,
        }
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_physics(mut self, physics: PhysicsComponent) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn size(&self) -> Vector2 {
        self.size
    }

    #[inline]
    pub fn half_size(&self) -> Vector2 {
        self.half_size
    }

    #[inline]
    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    #[inline]
    pub fn physics(&self) -> Option<&PhysicsComponent> {
        self.physics.as_ref()
    }

    #[inline]
    pub fn physics_mut(&mut self) -> Option<&mut PhysicsComponent> {
        self.physics.as_mut()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.physics.is_some()
    }

    /// Ground flag as of the last contact pass
    pub fn on_ground(&self) -> bool {
        self.physics.as_ref().is_some_and(|p| p.contact().is_grounded())
    }

    /// Ground flag from the tick before
    pub fn was_on_ground(&self) -> bool {
        self.physics.as_ref().is_some_and(|p| p.contact().was_grounded())
    }

    /// Whether both entities have colliders and they overlap
    pub fn overlaps(&self, other: &Entity) -> bool {
        match (&self.collider, &other.collider) {
            (Some(a), Some(b)) => a.overlaps(b, self.position, other.position),
            _ => false,
        }
    }

    /// Advance position by velocity scaled to the frame delta
    pub fn integrate(&mut self, frame_delta_ms: f32) {
        self.position = self.position + self.velocity * (frame_delta_ms / REFERENCE_DELTA_MS);
    }

    /// Latch the ground flag and apply any gravity due this tick
    pub fn begin_physics(&mut self, tick: u64, frame_delta_ms: f32) {
        if let Some(physics) = self.physics.as_mut() {
            self.velocity = physics.begin_tick(self.velocity, tick, frame_delta_ms);
        }
    }

    /// Stop vertical motion on the tick the entity lands
    pub fn settle_landing(&mut self) {
        if let Some(physics) = self.physics.as_ref() {
            let settled = physics.settle_landing(self.velocity);
            if settled != self.velocity {
                log::debug!("entity {} landed at {}", self.id, self.position);
            }
            self.velocity = settled;
        }
    }

    /// Keep the entity inside the bounds, one axis at a time.
    ///
    /// Moving platforms bounce horizontally instead of stopping.
    pub fn clamp_to_bounds(&mut self, bounds: &Bounds) {
        let (min, max) = (bounds.min(), bounds.max());
        let reflect_x = self.kind == EntityKind::MovingPlatform;

        let x = clamp_axis(
            self.position.x(),
            self.velocity.x(),
            min.x(),
            max.x(),
            self.half_size.x(),
            reflect_x,
        );
        let y = clamp_axis(
            self.position.y(),
            self.velocity.y(),
            min.y(),
            max.y(),
            self.half_size.y(),
            false,
        );

        if x.hit && reflect_x {
            log::debug!("platform {} reversed at x={}", self.id, x.position);
        }
        if x.hit || y.hit {
            self.position = Vector2::new(x.position, y.position);
            self.velocity = Vector2::new(x.velocity, y.velocity);
        }
    }

    /// Per-tick update for entities that do not probe for contacts
    pub fn self_update(&mut self, tick: u64, frame_delta_ms: f32, bounds: &Bounds) {
        self.begin_physics(tick, frame_delta_ms);
        self.integrate(frame_delta_ms);
        if self.collider.is_some() {
            self.clamp_to_bounds(bounds);
        }
        self.settle_landing();
    }
}
