//! Release velocity calculation for both shot models

use bevy::prelude::*;

use crate::constants::FIXED_DT;
use crate::helpers::{lerp, planar_direction};
use crate::tuning::{PhysicsTweaks, ShotModel};
use crate::world::{Basket, Court, Hoop};

/// Everything the step needs to launch the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    pub target: Basket,
    pub velocity: Vec3,
    /// Whole ticks to the rim center (FlightTime model only)
    pub flight_ticks: Option<u32>,
}

/// Pick the nearest hoop and compute the launch velocity for `power`
pub fn plan_shot(from: Vec3, power: f32, court: &Court, tweaks: &PhysicsTweaks) -> ShotPlan {
    let hoop = court.nearest_hoop(from);
    let power = if power.is_finite() {
        power.clamp(0.0, 1.0)
    } else {
        0.0
    };

    match tweaks.shot_model {
        ShotModel::FlightTime => {
            let (velocity, ticks) = flight_time_velocity(from, hoop, power, tweaks);
            ShotPlan {
                target: hoop.side,
                velocity,
                flight_ticks: Some(ticks),
            }
        }
        ShotModel::Linear => ShotPlan {
            target: hoop.side,
            velocity: linear_velocity(from, hoop, power, tweaks),
            flight_ticks: None,
        },
    }
}

/// Outward-facing fallback for a ball standing directly under the rim
fn shot_direction(from: Vec3, hoop: &Hoop) -> Vec3 {
    planar_direction(from, hoop.rim_center, Vec3::X * hoop.side.sign())
}

/// Back-solve the launch velocity so the semi-implicit integrator lands the
/// ball center on the rim center after exactly `n` ticks:
/// `p_n = p_0 + n·dt·v_0 + g·dt²·n(n+1)/2`
pub fn flight_time_velocity(
    from: Vec3,
    hoop: &Hoop,
    power: f32,
    tweaks: &PhysicsTweaks,
) -> (Vec3, u32) {
    let flight_secs = lerp(tweaks.flight_time_slow, tweaks.flight_time_fast, power);
    let ticks = (flight_secs / FIXED_DT).round().max(1.0) as u32;
    let n = ticks as f32;
    let travel = n * FIXED_DT;

    let dir = shot_direction(from, hoop);
    let distance = hoop.horizontal_distance(from);
    let rise = hoop.rim_center.y - from.y;

    let horizontal = distance / travel;
    let vertical = (rise - tweaks.gravity * FIXED_DT * FIXED_DT * n * (n + 1.0) / 2.0) / travel;

    (dir * horizontal + Vec3::Y * vertical, ticks)
}

/// Speeds scale directly with power
pub fn linear_velocity(from: Vec3, hoop: &Hoop, power: f32, tweaks: &PhysicsTweaks) -> Vec3 {
    let dir = shot_direction(from, hoop);
    dir * power * tweaks.linear_horizontal_speed + Vec3::Y * power * tweaks.linear_vertical_speed
}
