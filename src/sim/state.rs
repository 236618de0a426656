//! World state and scene setup
//!
//! The world owns everything a tick needs: bounds, the tick clock, player
//! tuning, the player and the rest of the entities. Nothing is global.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collider::{Collider, GeometryError};
use super::entity::{Bounds, Entity, EntityKind};
use super::physics::PhysicsComponent;
use super::vector::Vector2;
use crate::settings::{PlayerTuning, Settings, SettingsError};

/// Errors building a world
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("entity {id}: {source}")]
    Geometry {
        id: u32,
        #[source]
        source: GeometryError,
    },
    #[error("player spec has kind `{0}`, expected `player`")]
    NotAPlayer(&'static str),
    #[error("entity {id} has kind `player`; a world has exactly one player")]
    ExtraPlayer { id: u32 },
    #[error("entity {id} ({width}x{height}) does not fit inside the world")]
    DoesNotFit { id: u32, width: f32, height: f32 },
}

/// Collider to attach to a new entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeSpec {
    Circle { radius: f32 },
    /// Rectangle matching the entity size
    Rectangle,
}

/// Initial description of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    pub kind: EntityKind,
    pub position: Vector2,
    pub size: Vector2,
    pub shape: Option<ShapeSpec>,
    /// Dynamic entities get a physics component
    pub active: bool,
    pub velocity: Option<Vector2>,
}

impl EntitySpec {
    /// A static entity with a rectangle collider matching its size
    pub fn new(kind: EntityKind, position: Vector2, size: Vector2) -> Self {
        Self {
            kind,
            position,
            size,
            shape: Some(ShapeSpec::Rectangle),
            active: false,
            velocity: None,
        }
    }

    pub fn circle(mut self, radius: f32) -> Self {
        self.shape = Some(ShapeSpec::Circle { radius });
        self
    }

    pub fn without_collider(mut self) -> Self {
        self.shape = None;
        self
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = Some(velocity);
        self
    }
}

/// Read-only view of an entity for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderItem {
    pub id: u32,
    pub kind: EntityKind,
    pub position: Vector2,
    pub size: Vector2,
}

impl From<&Entity> for RenderItem {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            position: entity.position,
            size: entity.size(),
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub bounds: Bounds,
    /// Simulation tick counter (drives gravity cadence)
    pub time_ticks: u64,
    pub paused: bool,
    pub tuning: PlayerTuning,
    pub player: Entity,
    /// Everything else, updated before the player each tick
    pub entities: Vec<Entity>,
}

impl World {
    /// Build a world from a player spec and the remaining entity specs
    pub fn new(
        settings: &Settings,
        player: EntitySpec,
        entities: Vec<EntitySpec>,
    ) -> Result<Self, SceneError> {
        settings.validate()?;
        if player.kind != EntityKind::Player {
            return Err(SceneError::NotAPlayer(player.kind.as_str()));
        }

        let bounds = settings.bounds();
        let player = build_entity(0, &player, settings, &bounds)?;
        let entities = entities
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let id = i as u32 + 1;
                if spec.kind == EntityKind::Player {
                    return Err(SceneError::ExtraPlayer { id });
                }
                build_entity(id, spec, settings, &bounds)
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "World created: {}x{}, {} entities",
            bounds.half_width * 2.0,
            bounds.half_height * 2.0,
            entities.len() + 1
        );

        Ok(Self {
            bounds,
            time_ticks: 0,
            paused: false,
            tuning: settings.player,
            player,
            entities,
        })
    }

    /// The demo scene: a player, a block, a patrolling platform and a trampoline
    pub fn demo(settings: &Settings) -> Result<Self, SceneError> {
        let player = EntitySpec::new(
            EntityKind::Player,
            Vector2::new(-30.0, 0.0),
            Vector2::new(20.0, 20.0),
        )
        .circle(10.0);

        let entities = vec![
            EntitySpec::new(
                EntityKind::Obstacle,
                Vector2::new(-300.0, -100.0),
                Vector2::new(80.0, 80.0),
            ),
            EntitySpec::new(
                EntityKind::MovingPlatform,
                Vector2::new(0.0, -100.0),
                Vector2::new(80.0, 80.0),
            ),
            EntitySpec::new(
                EntityKind::Trampoline,
                Vector2::new(250.0, -340.0),
                Vector2::new(100.0, 20.0),
            ),
        ];

        Self::new(settings, player, entities)
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.entities.iter().find(|e| e.id == id)
    }

    /// Positions and sizes to draw, scenery first and the player last
    pub fn render_items(&self) -> impl Iterator<Item = RenderItem> + '_ {
        self.entities
            .iter()
            .chain(std::iter::once(&self.player))
            .map(RenderItem::from)
    }

    /// One-line summary of the player state for logs
    pub fn debug_line(&self) -> String {
        format!(
            "tick {} on_ground: {} ({}) v: {} pos: {}",
            self.time_ticks,
            self.player.on_ground(),
            self.player.was_on_ground(),
            self.player.velocity,
            self.player.position
        )
    }
}

fn build_entity(
    id: u32,
    spec: &EntitySpec,
    settings: &Settings,
    bounds: &Bounds,
) -> Result<Entity, SceneError> {
    let half_size = spec.size / 2.0;
    if !bounds.fits(half_size) {
        return Err(SceneError::DoesNotFit {
            id,
            width: spec.size.x(),
            height: spec.size.y(),
        });
    }

    let mut entity = Entity::new(id, spec.kind, spec.position, spec.size);

    if let Some(shape) = spec.shape {
        let collider = match shape {
            ShapeSpec::Circle { radius } => Collider::circle(radius),
            ShapeSpec::Rectangle => Collider::rectangle(spec.size.x(), spec.size.y()),
        }
        .map_err(|source| SceneError::Geometry { id, source })?;
        entity = entity.with_collider(collider);
    }

    let physics = &settings.physics;
    match spec.kind {
        // Platforms ride a fixed horizontal path
        EntityKind::MovingPlatform => {
            entity = entity
                .with_physics(PhysicsComponent::new(
                    physics.ticks_per_second,
                    0.0,
                    physics.cadence,
                ))
                .with_velocity(Vector2::new(-settings.platform_speed, 0.0));
        }
        EntityKind::Player => {
            entity = entity.with_physics(PhysicsComponent::new(
                physics.ticks_per_second,
                physics.gravity_scale,
                physics.cadence,
            ));
        }
        EntityKind::None | EntityKind::Obstacle | EntityKind::Trampoline => {
            if spec.active {
                entity = entity.with_physics(PhysicsComponent::new(
                    physics.ticks_per_second,
                    physics.gravity_scale,
                    physics.cadence,
                ));
            }
        }
    }

    if let Some(velocity) = spec.velocity {
        entity.velocity = velocity;
    }
    Ok(entity)
}
