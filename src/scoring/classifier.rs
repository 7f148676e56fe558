//! Shot outcome classification at the rim plane

use crate::ball::{BallState, ShotAttempt};
use crate::tuning::PhysicsTweaks;
use crate::world::Hoop;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// In without touching rim or backboard
    Swish,
    /// In after rim or backboard contact
    Assisted,
    Missed,
}

/// Classify one airborne tick against the attempt's target hoop.
///
/// Only a downward crossing of the rim plane (`prev_y > rim_y >= y`) is
/// judged; anything else returns `None`. Once an attempt has scored, later
/// crossings are ignored. The caller records the make.
pub fn classify_crossing(
    prev_y: f32,
    ball: &BallState,
    attempt: &ShotAttempt,
    hoop: &Hoop,
    tweaks: &PhysicsTweaks,
) -> Option<ShotOutcome> {
    let rim_y = hoop.rim_center.y;
    let crossed_down = ball.velocity.y < 0.0 && prev_y > rim_y && rim_y >= ball.position.y;
    if !crossed_down || attempt.scored {
        return None;
    }

    let centered = hoop.horizontal_distance(ball.position) < tweaks.made_radius;
    let level = (ball.position.y - rim_y).abs() < tweaks.made_height_tolerance;
    let falling_straight = ball.velocity.x.abs() < tweaks.made_max_horizontal_speed
        && ball.velocity.z.abs() < tweaks.made_max_horizontal_speed;

    if centered && level && falling_straight {
        if attempt.is_clean() {
            Some(ShotOutcome::Swish)
        } else {
            Some(ShotOutcome::Assisted)
        }
    } else {
        Some(ShotOutcome::Missed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Basket;
    use bevy::prelude::*;

    fn setup() -> (Hoop, PhysicsTweaks, ShotAttempt) {
        (
            Hoop::new(Basket::Right),
            PhysicsTweaks::default(),
            ShotAttempt::new(Basket::Right),
        )
    }

    fn ball_at(position: Vec3, velocity: Vec3) -> BallState {
        BallState {
            position,
            velocity,
            radius: 0.35,
            airborne: true,
        }
    }

    #[test]
    fn test_clean_drop_is_swish() {
        let (hoop, tweaks, attempt) = setup();
        let ball = ball_at(hoop.rim_center - Vec3::Y * 0.05, Vec3::new(0.0, -3.0, 0.0));
        let outcome = classify_crossing(hoop.rim_center.y + 0.05, &ball, &attempt, &hoop, &tweaks);
        assert_eq!(outcome, Some(ShotOutcome::Swish));
    }

    #[test]
    fn test_rim_touch_makes_it_assisted() {
        let (hoop, tweaks, mut attempt) = setup();
        attempt.touched_rim = true;
        let ball = ball_at(hoop.rim_center - Vec3::Y * 0.05, Vec3::new(1.0, -3.0, 0.0));
        let outcome = classify_crossing(hoop.rim_center.y + 0.05, &ball, &attempt, &hoop, &tweaks);
        assert_eq!(outcome, Some(ShotOutcome::Assisted));
    }

    #[test]
    fn test_upward_crossing_ignored() {
        let (hoop, tweaks, attempt) = setup();
        let ball = ball_at(hoop.rim_center + Vec3::Y * 0.05, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(
            classify_crossing(hoop.rim_center.y - 0.05, &ball, &attempt, &hoop, &tweaks),
            None
        );
    }

    #[test]
    fn test_off_center_is_miss() {
        let (hoop, tweaks, attempt) = setup();
        let ball = ball_at(
            hoop.rim_center + Vec3::new(-0.6, -0.05, 0.0),
            Vec3::new(0.0, -3.0, 0.0),
        );
        let outcome = classify_crossing(hoop.rim_center.y + 0.05, &ball, &attempt, &hoop, &tweaks);
        assert_eq!(outcome, Some(ShotOutcome::Missed));
    }

    #[test]
    fn test_fast_sideways_ball_is_miss() {
        let (hoop, tweaks, attempt) = setup();
        let ball = ball_at(hoop.rim_center - Vec3::Y * 0.05, Vec3::new(9.0, -3.0, 0.0));
        let outcome = classify_crossing(hoop.rim_center.y + 0.05, &ball, &attempt, &hoop, &tweaks);
        assert_eq!(outcome, Some(ShotOutcome::Missed));
    }

    #[test]
    fn test_scored_attempt_not_judged_again() {
        let (hoop, tweaks, mut attempt) = setup();
        attempt.mark_scored();
        let ball = ball_at(hoop.rim_center - Vec3::Y * 0.05, Vec3::new(0.0, -3.0, 0.0));
        assert_eq!(
            classify_crossing(hoop.rim_center.y + 0.05, &ball, &attempt, &hoop, &tweaks),
            None
        );
    }
}
