//! Tunable constants for hoopshot
//!
//! Court landmarks and physics defaults live here. Runtime-adjustable copies of
//! the physics values are held in `PhysicsTweaks`.

use bevy::prelude::*;

// =============================================================================
// TIMESTEP
// =============================================================================

pub const FIXED_HZ: f64 = 60.0;
pub const FIXED_DT: f32 = 1.0 / 60.0;

// =============================================================================
// COURT DIMENSIONS
// =============================================================================

pub const COURT_LENGTH: f32 = 30.0; // Along X, hoop to hoop
pub const COURT_WIDTH: f32 = 15.0; // Along Z
pub const COURT_HALF_LENGTH: f32 = COURT_LENGTH / 2.0;
pub const COURT_HALF_WIDTH: f32 = COURT_WIDTH / 2.0;
pub const FLOOR_THICKNESS: f32 = 0.2;
pub const FLOOR_SURFACE_Y: f32 = FLOOR_THICKNESS / 2.0; // Slab centered on y = 0

// =============================================================================
// HOOPS
// =============================================================================

pub const RIM_HEIGHT: f32 = 3.05;
pub const RIM_RADIUS: f32 = 0.5;
pub const RIM_TUBE_RADIUS: f32 = 0.04;
pub const RIM_OFFSET: f32 = 0.55; // Rim center distance in front of the backboard plane
pub const RIM_RING_SEGMENTS: usize = 24;
pub const RIM_SEPARATION: f32 = 0.001; // Gap left after pushing the ball off the rim
pub const RIM_CONTACT_MARGIN: f32 = 2.0 * RIM_SEPARATION; // A contact episode ends past this gap
pub const RIM_ROLL_NORMAL_Y: f32 = 0.95; // Contact normals steeper than this get tilted
pub const RIM_ROLL_TILT: f32 = 0.25; // Outward lean added to near-vertical rim normals

pub const BACKBOARD_X: f32 = COURT_HALF_LENGTH; // Center plane of each board (mirrored)
pub const BACKBOARD_THICKNESS: f32 = 0.05;
pub const BACKBOARD_HEIGHT: f32 = 1.8;
pub const BACKBOARD_WIDTH: f32 = 3.5;
pub const BACKBOARD_CENTER_Y: f32 = 3.7;

// =============================================================================
// BALL
// =============================================================================

pub const BALL_RADIUS: f32 = 0.35;
pub const BALL_SPAWN_XZ: Vec2 = Vec2::ZERO; // Center court
pub const BALL_MOVE_STEP: f32 = 0.15; // Grounded movement per tick

// =============================================================================
// BALL PHYSICS
// =============================================================================

pub const GRAVITY: f32 = -9.8; // Units per second squared
pub const FLOOR_RESTITUTION: f32 = 0.65; // Vertical speed kept per floor bounce
pub const FLOOR_FRICTION: f32 = 0.8; // Horizontal speed kept per floor bounce
pub const STOP_SPEED: f32 = 1.0; // Below this vertical impact speed the ball settles
pub const WALL_DAMPING: f32 = 0.6;
pub const BACKBOARD_DAMPING: f32 = 0.7;
pub const RIM_DAMPING: f32 = 0.8;
pub const MAX_FLIGHT_SECS: f32 = 20.0; // Force-settle after this long in the air

// =============================================================================
// SHOOTING
// =============================================================================

pub const DEFAULT_SHOT_POWER: f32 = 0.5;
pub const POWER_STEP: f32 = 0.05;
pub const SHOT_FLIGHT_TIME_SLOW: f32 = 2.6; // Seconds to the rim at zero power
pub const SHOT_FLIGHT_TIME_FAST: f32 = 1.2; // Seconds to the rim at full power
pub const SHOT_LINEAR_HORIZONTAL: f32 = 6.0; // Linear model: horizontal speed at full power
pub const SHOT_LINEAR_VERTICAL: f32 = 13.0; // Linear model: vertical speed at full power (high arc, banks in)

// =============================================================================
// SCORING
// =============================================================================

pub const POINTS_PER_MAKE: u32 = 2;
pub const MADE_SHOT_RADIUS: f32 = 0.3; // Inside the rim clearance (rim radius - ball radius)
pub const MADE_HEIGHT_TOLERANCE: f32 = 0.3;
pub const MADE_MAX_HORIZONTAL_SPEED: f32 = 8.0; // Per axis, "mostly falling straight down"

// =============================================================================
// CLOCK
// =============================================================================

pub const GAME_CLOCK_SECS: u32 = 600; // 10 minutes

// =============================================================================
// PRESENTATION
// =============================================================================

pub const TRAIL_CAPACITY: usize = 24;
pub const FEEDBACK_DURATION: f32 = 1.5;

pub const COURT_COLOR: Color = Color::srgb(0.72, 0.52, 0.32);
pub const BACKBOARD_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);
pub const RIM_COLOR: Color = Color::srgb(1.0, 0.4, 0.0);
pub const BALL_COLOR: Color = Color::srgb(0.9, 0.45, 0.1);
pub const TRAIL_COLOR: Color = Color::srgba(1.0, 0.6, 0.2, 0.35);

pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8);
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4);
pub const TEXT_MADE: Color = Color::srgb(0.3, 1.0, 0.3);
pub const TEXT_MISSED: Color = Color::srgb(1.0, 0.3, 0.3);
