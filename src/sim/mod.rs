//! Deterministic simulation module
//!
//! All physics and collision logic lives here. This module must stay pure:
//! - Single-threaded, one tick per caller frame
//! - Stable iteration order (entities before the player, in scene order)
//! - No rendering or platform dependencies

pub mod collider;
pub mod collision;
pub mod entity;
pub mod physics;
pub mod state;
pub mod tick;
pub mod vector;

pub use collider::{Collider, ColliderShape, GeometryError};
pub use collision::{dispatch_player_collisions, respond};
pub use entity::{Bounds, Entity, EntityKind};
pub use physics::{GravityCadence, GroundContact, PhysicsComponent};
pub use state::{EntitySpec, RenderItem, SceneError, ShapeSpec, World};
pub use tick::{TickInput, apply_controls, tick};
pub use vector::Vector2;
