//! Court landmarks: hoops, backboards, rim collision rings, and court bounds
//!
//! All of this is immutable after construction. The scene meshes in `scene`
//! are placed from the same values so what you see is what collides.

mod scene;

pub use scene::*;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Which end of the court a hoop sits at
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basket {
    Left,
    Right,
}

impl Basket {
    pub const ALL: [Basket; 2] = [Basket::Left, Basket::Right];

    /// +1 for the right hoop, -1 for the left
    pub fn sign(&self) -> f32 {
        match self {
            Basket::Left => -1.0,
            Basket::Right => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Basket::Left => "left",
            Basket::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" | "l" => Some(Basket::Left),
            "right" | "r" => Some(Basket::Right),
            _ => None,
        }
    }
}

impl std::fmt::Display for Basket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Basket::Left => write!(f, "L"),
            Basket::Right => write!(f, "R"),
        }
    }
}

/// Axis-aligned backboard slab. The face is the plane on the court side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backboard {
    /// X of the court-facing plane
    pub face_x: f32,
    /// Unit X direction pointing from the board toward center court
    pub facing: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Backboard {
    fn for_side(side: Basket) -> Self {
        let s = side.sign();
        Self {
            face_x: s * (BACKBOARD_X - BACKBOARD_THICKNESS / 2.0),
            facing: -s,
            y_min: BACKBOARD_CENTER_Y - BACKBOARD_HEIGHT / 2.0,
            y_max: BACKBOARD_CENTER_Y + BACKBOARD_HEIGHT / 2.0,
            z_min: -BACKBOARD_WIDTH / 2.0,
            z_max: BACKBOARD_WIDTH / 2.0,
        }
    }

    /// Whether a sphere overlaps the board's y/z extent
    pub fn spans(&self, center: Vec3, radius: f32) -> bool {
        center.y + radius > self.y_min
            && center.y - radius < self.y_max
            && center.z + radius > self.z_min
            && center.z - radius < self.z_max
    }

    /// How far a sphere's leading edge has passed the face (positive = overlapping)
    pub fn penetration(&self, center: Vec3, radius: f32) -> f32 {
        // Distance in front of the face along the facing axis
        let in_front = (center.x - self.face_x) * self.facing;
        radius - in_front
    }
}

/// Pre-computed sample points approximating the rim torus
#[derive(Debug, Clone, PartialEq)]
pub struct RimRing {
    pub points: [Vec3; RIM_RING_SEGMENTS],
}

impl RimRing {
    pub fn new(center: Vec3, radius: f32) -> Self {
        let mut points = [center; RIM_RING_SEGMENTS];
        for (i, point) in points.iter_mut().enumerate() {
            let theta = i as f32 / RIM_RING_SEGMENTS as f32 * std::f32::consts::TAU;
            *point = center + Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin());
        }
        Self { points }
    }
}

/// One hoop: rim, ring proxy, and backboard
#[derive(Debug, Clone, PartialEq)]
pub struct Hoop {
    pub side: Basket,
    pub rim_center: Vec3,
    pub rim_radius: f32,
    pub rim_tube_radius: f32,
    pub backboard: Backboard,
    pub rim_ring: RimRing,
}

impl Hoop {
    pub fn new(side: Basket) -> Self {
        let rim_center = Vec3::new(side.sign() * (BACKBOARD_X - RIM_OFFSET), RIM_HEIGHT, 0.0);
        Self {
            side,
            rim_center,
            rim_radius: RIM_RADIUS,
            rim_tube_radius: RIM_TUBE_RADIUS,
            backboard: Backboard::for_side(side),
            rim_ring: RimRing::new(rim_center, RIM_RADIUS),
        }
    }

    /// Horizontal (XZ) distance from a point to the rim center
    pub fn horizontal_distance(&self, point: Vec3) -> f32 {
        Vec2::new(point.x - self.rim_center.x, point.z - self.rim_center.z).length()
    }
}

/// Immutable court geometry shared by the simulation and the renderer
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Court {
    pub hoops: [Hoop; 2],
    pub half_length: f32,
    pub half_width: f32,
}

impl Default for Court {
    fn default() -> Self {
        Self {
            hoops: [Hoop::new(Basket::Left), Hoop::new(Basket::Right)],
            half_length: COURT_HALF_LENGTH,
            half_width: COURT_HALF_WIDTH,
        }
    }
}

impl Court {
    pub fn hoop(&self, side: Basket) -> &Hoop {
        match side {
            Basket::Left => &self.hoops[0],
            Basket::Right => &self.hoops[1],
        }
    }

    /// Nearest hoop by straight-line distance to its rim center.
    /// Ties go to the right hoop.
    pub fn nearest_hoop(&self, position: Vec3) -> &Hoop {
        let left = &self.hoops[0];
        let right = &self.hoops[1];
        if position.distance_squared(left.rim_center) < position.distance_squared(right.rim_center)
        {
            left
        } else {
            right
        }
    }

    /// Clamp limits for a ball center of the given radius: (max |x|, max |z|)
    pub fn ball_limits(&self, radius: f32) -> (f32, f32) {
        (
            (self.half_length - radius).max(0.0),
            (self.half_width - radius).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hoops_are_mirrored() {
        let court = Court::default();
        let left = court.hoop(Basket::Left);
        let right = court.hoop(Basket::Right);
        assert!((left.rim_center.x + right.rim_center.x).abs() < 1e-6);
        assert!((right.rim_center.x - 14.45).abs() < 1e-4);
        assert_eq!(right.rim_center.y, RIM_HEIGHT);
        assert!(right.backboard.face_x > right.rim_center.x);
        assert!(left.backboard.face_x < left.rim_center.x);
    }

    #[test]
    fn test_rim_ring_points_on_circle() {
        let hoop = Hoop::new(Basket::Right);
        for p in &hoop.rim_ring.points {
            assert!((hoop.horizontal_distance(*p) - RIM_RADIUS).abs() < 1e-4);
            assert_eq!(p.y, RIM_HEIGHT);
        }
    }

    #[test]
    fn test_nearest_hoop() {
        let court = Court::default();
        assert_eq!(court.nearest_hoop(Vec3::new(3.0, 0.5, 2.0)).side, Basket::Right);
        assert_eq!(court.nearest_hoop(Vec3::new(-0.1, 0.5, 0.0)).side, Basket::Left);
        assert_eq!(court.nearest_hoop(Vec3::new(0.0, 0.5, 0.0)).side, Basket::Right);
    }

    #[test]
    fn test_backboard_penetration() {
        let board = Hoop::new(Basket::Right).backboard;
        let touching = Vec3::new(board.face_x - 0.35, 3.5, 0.0);
        assert!(board.penetration(touching, 0.35).abs() < 1e-5);
        let inside = Vec3::new(board.face_x - 0.2, 3.5, 0.0);
        assert!(board.penetration(inside, 0.35) > 0.0);
        assert!(board.spans(inside, 0.35));
        assert!(!board.spans(Vec3::new(14.0, 1.0, 0.0), 0.35));
    }

    #[test]
    fn test_basket_names() {
        assert_eq!(Basket::from_name("Right"), Some(Basket::Right));
        assert_eq!(Basket::from_name("l"), Some(Basket::Left));
        assert_eq!(Basket::from_name("center"), None);
    }
}
