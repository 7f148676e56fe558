//! Ball physics: fixed-step integration and collision response
//!
//! Everything here is plain functions over `BallState` so the same code runs
//! inside the Bevy app, the scenario runner, and the headless sweep.

use bevy::prelude::*;

use super::components::{BallState, ShotAttempt};
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::tuning::PhysicsTweaks;
use crate::world::{Backboard, Court, Hoop};

/// Result of one airborne step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    InFlight,
    Settled,
}

/// Result of floor handling for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloorContact {
    None,
    Bounce { impact_speed: f32 },
    Settled,
}

/// Apply gravity to vertical velocity
pub fn apply_gravity(ball: &mut BallState, gravity: f32, dt: f32) {
    ball.velocity.y += gravity * dt;
}

/// Advance position by velocity
pub fn integrate(ball: &mut BallState, dt: f32) {
    ball.position += ball.velocity * dt;
}

/// Clamp the ball inside the court. Outward velocity on a clamped axis is
/// reflected and damped. Returns true if any axis was clamped.
pub fn resolve_boundaries(ball: &mut BallState, court: &Court, damping: f32) -> bool {
    let (max_x, max_z) = court.ball_limits(ball.radius);
    let hit_x = clamp_axis(&mut ball.position.x, &mut ball.velocity.x, max_x, damping);
    let hit_z = clamp_axis(&mut ball.position.z, &mut ball.velocity.z, max_z, damping);
    hit_x || hit_z
}

fn clamp_axis(position: &mut f32, velocity: &mut f32, limit: f32, damping: f32) -> bool {
    if *position > limit {
        *position = limit;
        if *velocity > 0.0 {
            *velocity = -*velocity * damping;
        }
        true
    } else if *position < -limit {
        *position = -limit;
        if *velocity < 0.0 {
            *velocity = -*velocity * damping;
        }
        true
    } else {
        false
    }
}

/// Push the ball out of one backboard. Returns true on contact.
pub fn resolve_backboard(ball: &mut BallState, board: &Backboard, damping: f32) -> bool {
    if !board.spans(ball.position, ball.radius) {
        return false;
    }
    if board.penetration(ball.position, ball.radius) <= 0.0 {
        return false;
    }

    ball.position.x = board.face_x + board.facing * ball.radius;
    // Moving into the board means velocity opposes the facing direction
    if ball.velocity.x * board.facing < 0.0 {
        ball.velocity.x = -ball.velocity.x * damping;
    }
    true
}

/// Deepest rim sample the ball overlaps: (contact normal, sample point)
pub fn rim_contact(ball: &BallState, hoop: &Hoop) -> Option<(Vec3, Vec3)> {
    let reach = ball.radius + hoop.rim_tube_radius;
    let mut deepest: Option<(f32, Vec3)> = None;

    for point in &hoop.rim_ring.points {
        let dist = ball.position.distance(*point);
        if dist < reach && deepest.is_none_or(|(best, _)| dist < best) {
            deepest = Some((dist, *point));
        }
    }

    let (_, point) = deepest?;
    Some((contact_normal(ball.position, point, hoop.rim_center), point))
}

/// Whether the ball is within `margin` of touching any rim sample
pub fn rim_within(ball: &BallState, hoop: &Hoop, margin: f32) -> bool {
    let reach = ball.radius + hoop.rim_tube_radius + margin;
    hoop.rim_ring
        .points
        .iter()
        .any(|point| ball.position.distance(*point) < reach)
}

/// Unit normal from a rim sample to the ball center. Degenerate cases fall
/// back to the outward radial direction, then straight up.
///
/// Near-vertical normals lean outward by `RIM_ROLL_TILT`; nothing rests on
/// top of the tube.
pub fn contact_normal(ball_center: Vec3, sample: Vec3, rim_center: Vec3) -> Vec3 {
    let radial = Vec3::new(sample.x - rim_center.x, 0.0, sample.z - rim_center.z).try_normalize();
    let Some(normal) = (ball_center - sample).try_normalize() else {
        return radial.unwrap_or(Vec3::Y);
    };
    match radial {
        Some(out) if normal.y > RIM_ROLL_NORMAL_Y => (normal + out * RIM_ROLL_TILT).normalize(),
        _ => normal,
    }
}

/// Push the ball off one rim. The ball is always moved to the surface; the
/// velocity is only reflected while it still approaches, so repeated frames of
/// overlap never pump energy in. Returns true on contact.
pub fn resolve_rim(ball: &mut BallState, hoop: &Hoop, damping: f32) -> bool {
    let Some((normal, point)) = rim_contact(ball, hoop) else {
        return false;
    };

    let reach = ball.radius + hoop.rim_tube_radius;
    ball.position = point + normal * (reach + RIM_SEPARATION);

    let approach = ball.velocity.dot(normal);
    if approach < 0.0 {
        ball.velocity = (ball.velocity - 2.0 * approach * normal) * damping;
    }
    true
}

/// Floor contact: clamp, then bounce or settle
pub fn resolve_floor(ball: &mut BallState, tweaks: &PhysicsTweaks) -> FloorContact {
    let rest = ball.radius + FLOOR_SURFACE_Y;
    if ball.position.y > rest {
        return FloorContact::None;
    }

    ball.position.y = rest;
    if ball.velocity.y >= 0.0 {
        return FloorContact::None;
    }

    let impact_speed = -ball.velocity.y;
    if impact_speed > tweaks.stop_speed {
        ball.velocity.y = impact_speed * tweaks.floor_restitution;
        ball.velocity.x *= tweaks.floor_friction;
        ball.velocity.z *= tweaks.floor_friction;
        FloorContact::Bounce { impact_speed }
    } else {
        settle(ball);
        FloorContact::Settled
    }
}

/// Stop the ball on the floor
pub fn settle(ball: &mut BallState) {
    ball.position.y = ball.radius + FLOOR_SURFACE_Y;
    ball.velocity = Vec3::ZERO;
    ball.airborne = false;
}

/// One airborne tick: gravity, motion, then backboards, rims, court bounds,
/// and floor. Touch events fire once per contact episode.
pub fn step_airborne(
    ball: &mut BallState,
    attempt: &mut ShotAttempt,
    court: &Court,
    tweaks: &PhysicsTweaks,
    bus: &mut EventBus,
) -> FlightStatus {
    apply_gravity(ball, tweaks.gravity, FIXED_DT);
    integrate(ball, FIXED_DT);

    let mut board_hit = None;
    for hoop in &court.hoops {
        if resolve_backboard(ball, &hoop.backboard, tweaks.backboard_damping) {
            board_hit = Some(hoop.side);
        }
    }
    if let Some(side) = board_hit {
        attempt.touched_backboard = true;
        if !attempt.backboard_contact {
            bus.emit(GameEvent::BackboardTouch { hoop: side });
        }
    }
    attempt.backboard_contact = board_hit.is_some();

    let mut rim_hit = None;
    for hoop in &court.hoops {
        if resolve_rim(ball, hoop, tweaks.rim_damping) {
            rim_hit = Some(hoop.side);
        }
    }
    if let Some(side) = rim_hit {
        attempt.touched_rim = true;
        if !attempt.rim_contact {
            bus.emit(GameEvent::RimTouch { hoop: side });
        }
    }
    // Episode ends past the push-out gap, not at it
    attempt.rim_contact = rim_hit.is_some()
        || (attempt.rim_contact
            && court
                .hoops
                .iter()
                .any(|hoop| rim_within(ball, hoop, RIM_CONTACT_MARGIN)));

    resolve_boundaries(ball, court, tweaks.wall_damping);

    match resolve_floor(ball, tweaks) {
        FloorContact::None => FlightStatus::InFlight,
        FloorContact::Bounce { impact_speed } => {
            bus.emit(GameEvent::Bounce { speed: impact_speed });
            FlightStatus::InFlight
        }
        FloorContact::Settled => FlightStatus::Settled,
    }
}

/// Move a grounded ball by one discrete step per held direction.
/// `direction` is (x, z) in -1..=1; y stays pinned to rest height.
pub fn move_grounded(ball: &mut BallState, direction: Vec2, step: f32, court: &Court) {
    let (max_x, max_z) = court.ball_limits(ball.radius);
    ball.position.x = (ball.position.x + direction.x * step).clamp(-max_x, max_x);
    ball.position.z = (ball.position.z + direction.y * step).clamp(-max_z, max_z);
    ball.position.y = ball.radius + FLOOR_SURFACE_Y;
    ball.velocity = Vec3::ZERO;
}
