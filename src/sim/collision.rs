//! Player-vs-obstacle collision dispatch
//!
//! The player is the only entity that probes for contacts. Each tick it is
//! tested against every obstacle; on overlap the obstacle's kind decides how
//! the player's velocity changes.

use super::entity::{Entity, EntityKind};
use super::vector::Vector2;
use crate::consts::TRAMPOLINE_FACTOR;

/// Scale a velocity, folding `-0.0` components back to `0.0`
#[inline]
fn scale_unsigned_zero(v: Vector2, factor: f32) -> Vector2 {
    let scaled = v * factor;
    Vector2::new(scaled.x() + 0.0, scaled.y() + 0.0)
}

/// Velocity the player leaves an obstacle of `kind` with, or `None` if the
/// obstacle leaves it alone.
///
/// `arrival` is the velocity the player reached the contact with, `settled`
/// the same velocity after this tick's landing settle. A trampoline launches
/// from the arrival velocity; an obstacle repels whatever motion is left once
/// the fall has been stopped.
pub fn respond(
    kind: EntityKind,
    arrival: Vector2,
    settled: Vector2,
    was_grounded: bool,
) -> Option<Vector2> {
    match kind {
        EntityKind::Obstacle | EntityKind::MovingPlatform => {
            // Only repel on the first contact after being airborne
            if was_grounded {
                return None;
            }
            let speed = settled.magnitude();
            Some(scale_unsigned_zero(settled.normalize(), -speed))
        }
        EntityKind::Trampoline => Some(scale_unsigned_zero(arrival, TRAMPOLINE_FACTOR)),
        EntityKind::Player | EntityKind::None => {
            unreachable!("{} entity dispatched as an obstacle", kind.as_str())
        }
    }
}

/// Test the player against every obstacle and apply responses.
///
/// Contacts are gathered first: the ground flag becomes true if any obstacle
/// overlaps this tick, and the landing settle runs on the airborne to grounded
/// edge. Then at most one response is applied, from the first touched obstacle
/// (scene order) that has one, so overlapping obstacles never compound.
/// Returns the number of contacts.
pub fn dispatch_player_collisions(player: &mut Entity, obstacles: &[Entity]) -> usize {
    let arrival = player.velocity;
    let was_grounded = player.was_on_ground();
    if let Some(physics) = player.physics_mut() {
        physics.contact_mut().reset();
    }

    let mut touched = Vec::new();
    for obstacle in obstacles.iter().filter(|e| e.kind.is_obstacle()) {
        if !player.overlaps(obstacle) {
            continue;
        }
        log::trace!(
            "player {} touched {} {}",
            player.id,
            obstacle.kind.as_str(),
            obstacle.id
        );
        touched.push(obstacle.kind);
        if let Some(physics) = player.physics_mut() {
            physics.contact_mut().record(true);
        }
    }

    player.settle_landing();
    let settled = player.velocity;
    if let Some(velocity) = touched
        .iter()
        .find_map(|&kind| respond(kind, arrival, settled, was_grounded))
    {
        player.velocity = velocity;
    }
    touched.len()
}
