//! Ball state, shot bookkeeping, and render markers

use bevy::prelude::*;

use crate::world::Basket;

/// Marker for the rendered ball mesh
#[derive(Component)]
pub struct Ball;

/// Physical state of the single ball. Owned by `GameSim`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub airborne: bool,
}

impl BallState {
    /// A grounded ball at rest at the given position
    pub fn resting(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            airborne: false,
        }
    }

    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            position: self.position,
            velocity: self.velocity,
            airborne: self.airborne,
        }
    }
}

/// Read-only copy of the ball handed to the renderer each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub airborne: bool,
}

impl BallSnapshot {
    /// Orientation facing along the direction of travel (identity when still)
    pub fn heading(&self) -> Quat {
        let dir = self.velocity.normalize_or_zero();
        if dir == Vec3::ZERO || dir.abs_diff_eq(Vec3::Y, 1e-4) || dir.abs_diff_eq(Vec3::NEG_Y, 1e-4)
        {
            return Quat::IDENTITY;
        }
        Transform::IDENTITY.looking_to(dir, Vec3::Y).rotation
    }
}

/// Bookkeeping for one release-to-rest cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotAttempt {
    pub target: Basket,
    pub touched_rim: bool,
    pub touched_backboard: bool,
    /// Set once when the shot goes in; never cleared within the attempt
    pub scored: bool,
    /// Ball overlapped a rim last tick (current contact episode)
    pub rim_contact: bool,
    /// Ball overlapped a backboard last tick (current contact episode)
    pub backboard_contact: bool,
    /// Ticks spent airborne
    pub frames: u32,
}

impl ShotAttempt {
    pub fn new(target: Basket) -> Self {
        Self {
            target,
            touched_rim: false,
            touched_backboard: false,
            scored: false,
            rim_contact: false,
            backboard_contact: false,
            frames: 0,
        }
    }

    /// No rim or backboard contact so far
    pub fn is_clean(&self) -> bool {
        !self.touched_rim && !self.touched_backboard
    }

    pub fn mark_scored(&mut self) {
        self.scored = true;
    }
}
