//! The per-tick simulation aggregate
//!
//! `GameSim` owns the ball, the in-flight attempt, the score and the trail.
//! One call to `tick` is one fixed 1/60 s step: latched actions first (reset,
//! power, shoot), then either grounded movement or the airborne integrator
//! followed by the classifier. The Bevy app drives it from `FixedUpdate`;
//! scenario tests and the sweep drive it directly.

use bevy::prelude::*;

use crate::ball::{BallState, BallTrail, FlightStatus, ShotAttempt, move_grounded, settle, step_airborne};
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::input::PlayerInput;
use crate::scoring::{Score, ShotOutcome, classify_crossing};
use crate::shooting::plan_shot;
use crate::tuning::PhysicsTweaks;
use crate::world::{Basket, Court};

#[derive(Resource, Debug, Clone)]
pub struct GameSim {
    pub ball: BallState,
    /// `Some` exactly while the ball is airborne
    pub attempt: Option<ShotAttempt>,
    pub score: Score,
    pub trail: BallTrail,
    pub frame: u64,
}

impl Default for GameSim {
    fn default() -> Self {
        Self::new(&PhysicsTweaks::default())
    }
}

impl GameSim {
    pub fn new(tweaks: &PhysicsTweaks) -> Self {
        Self {
            ball: BallState::resting(Self::spawn_position(tweaks), tweaks.ball_radius),
            attempt: None,
            score: Score::default(),
            trail: BallTrail::default(),
            frame: 0,
        }
    }

    /// Center court, resting on the floor
    pub fn spawn_position(tweaks: &PhysicsTweaks) -> Vec3 {
        Vec3::new(BALL_SPAWN_XZ.x, tweaks.rest_height(), BALL_SPAWN_XZ.y)
    }

    /// Advance one fixed step
    pub fn tick(
        &mut self,
        court: &Court,
        tweaks: &PhysicsTweaks,
        input: &mut PlayerInput,
        bus: &mut EventBus,
    ) {
        self.frame += 1;

        if input.take_reset() {
            self.reset(input, tweaks, bus);
            return;
        }

        let steps = input.take_power_steps();
        if steps != 0 && input.adjust_power(steps as f32 * POWER_STEP) {
            bus.emit(GameEvent::PowerChange {
                power: input.shot_power,
            });
        }

        if input.take_shoot() {
            self.release(court, tweaks, input.shot_power, bus);
        }

        if self.ball.airborne {
            self.step_flight(court, tweaks, bus);
        } else {
            let direction = input.direction();
            if direction != Vec2::ZERO {
                move_grounded(&mut self.ball, direction, tweaks.move_step, court);
            }
        }
    }

    /// Launch toward the nearest hoop. Ignored while airborne.
    pub fn release(
        &mut self,
        court: &Court,
        tweaks: &PhysicsTweaks,
        power: f32,
        bus: &mut EventBus,
    ) -> bool {
        if self.ball.airborne {
            return false;
        }
        let plan = plan_shot(self.ball.position, power, court, tweaks);
        let released = self.release_with_velocity(plan.target, plan.velocity, power, bus);
        if released {
            debug!(
                "Shot at {} hoop: power {:.2}, velocity {:?}, {:?} ticks",
                plan.target.name(),
                power,
                plan.velocity,
                plan.flight_ticks
            );
        }
        released
    }

    /// Launch with an explicit velocity. Counts as an attempt like any release.
    pub fn release_with_velocity(
        &mut self,
        target: Basket,
        velocity: Vec3,
        power: f32,
        bus: &mut EventBus,
    ) -> bool {
        if self.ball.airborne || !velocity.is_finite() {
            return false;
        }
        self.ball.velocity = velocity;
        self.ball.airborne = true;
        self.attempt = Some(ShotAttempt::new(target));
        self.score.record_attempt();
        self.trail.clear();
        bus.emit(GameEvent::ShotRelease {
            target,
            power,
            velocity: velocity.into(),
        });
        true
    }

    /// Put the ball back at center court. The attempt is dropped unscored; the
    /// score itself is untouched.
    pub fn reset(&mut self, input: &mut PlayerInput, tweaks: &PhysicsTweaks, bus: &mut EventBus) {
        self.ball = BallState::resting(Self::spawn_position(tweaks), tweaks.ball_radius);
        self.attempt = None;
        self.trail.clear();
        input.clear_actions();
        input.set_power(DEFAULT_SHOT_POWER);
        bus.emit(GameEvent::Reset);
    }

    /// Place a grounded ball (clamped to the court). Ignored while airborne.
    pub fn place_ball(&mut self, x: f32, z: f32, court: &Court) -> bool {
        if self.ball.airborne {
            return false;
        }
        let (max_x, max_z) = court.ball_limits(self.ball.radius);
        self.ball.position = Vec3::new(
            x.clamp(-max_x, max_x),
            self.ball.radius + FLOOR_SURFACE_Y,
            z.clamp(-max_z, max_z),
        );
        true
    }

    fn step_flight(&mut self, court: &Court, tweaks: &PhysicsTweaks, bus: &mut EventBus) {
        let fallback = court.nearest_hoop(self.ball.position).side;
        let attempt = self
            .attempt
            .get_or_insert_with(|| ShotAttempt::new(fallback));

        let prev_y = self.ball.position.y;
        let status = step_airborne(&mut self.ball, attempt, court, tweaks, bus);
        attempt.frames += 1;
        self.trail.push(self.ball.position);

        let hoop = court.hoop(attempt.target);
        match classify_crossing(prev_y, &self.ball, attempt, hoop, tweaks) {
            Some(outcome @ (ShotOutcome::Swish | ShotOutcome::Assisted)) => {
                attempt.mark_scored();
                self.score.record_make();
                bus.emit(GameEvent::Scored {
                    hoop: hoop.side,
                    swish: outcome == ShotOutcome::Swish,
                    made: self.score.made,
                    attempts: self.score.attempts,
                    points: self.score.points,
                });
            }
            Some(ShotOutcome::Missed) => {
                bus.emit(GameEvent::Missed {
                    hoop: hoop.side,
                    distance: hoop.horizontal_distance(self.ball.position),
                });
            }
            None => {}
        }

        let timed_out = attempt.frames as f32 * FIXED_DT > tweaks.max_flight_secs;
        if status == FlightStatus::Settled || timed_out {
            if timed_out {
                settle(&mut self.ball);
            }
            let scored = attempt.scored;
            self.attempt = None;
            bus.emit(GameEvent::Settled { scored });
        }
    }

    /// Run until the current attempt settles or `max_ticks` pass with no input.
    /// Returns the number of ticks stepped.
    pub fn run_until_settled(
        &mut self,
        court: &Court,
        tweaks: &PhysicsTweaks,
        bus: &mut EventBus,
        max_ticks: u32,
    ) -> u32 {
        let mut input = PlayerInput::default();
        let mut ticks = 0;
        while self.ball.airborne && ticks < max_ticks {
            self.tick(court, tweaks, &mut input, bus);
            ticks += 1;
        }
        ticks
    }
}

/// FixedUpdate system: one simulation step per fixed tick
pub fn simulation_tick(
    mut sim: ResMut<GameSim>,
    court: Res<Court>,
    tweaks: Res<PhysicsTweaks>,
    mut input: ResMut<PlayerInput>,
    mut bus: ResMut<EventBus>,
) {
    sim.tick(&court, &tweaks, &mut input, &mut bus);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        court: Court,
        tweaks: PhysicsTweaks,
        input: PlayerInput,
        bus: EventBus,
        sim: GameSim,
    }

    impl Harness {
        fn new() -> Self {
            let tweaks = PhysicsTweaks::default();
            Self {
                court: Court::default(),
                sim: GameSim::new(&tweaks),
                tweaks,
                input: PlayerInput::default(),
                bus: EventBus::new(),
            }
        }

        fn tick(&mut self) {
            self.sim
                .tick(&self.court, &self.tweaks, &mut self.input, &mut self.bus);
        }

        fn event_names(&mut self) -> Vec<&'static str> {
            let names = self.bus.names();
            self.bus.drain();
            names
        }
    }

    #[test]
    fn test_ball_starts_grounded_at_center() {
        let h = Harness::new();
        assert_eq!(h.sim.ball.position, GameSim::spawn_position(&h.tweaks));
        assert!(!h.sim.ball.airborne);
        assert!(h.sim.attempt.is_none());
    }

    #[test]
    fn test_grounded_ball_stays_put_without_input() {
        let mut h = Harness::new();
        for _ in 0..120 {
            h.tick();
        }
        assert_eq!(h.sim.ball.position, GameSim::spawn_position(&h.tweaks));
        assert!(h.event_names().is_empty());
    }

    #[test]
    fn test_soft_shot_from_center_swishes() {
        let mut h = Harness::new();
        h.input.set_power(0.2);
        h.input.shoot_pressed = true;
        h.tick();
        assert!(h.sim.ball.airborne);
        assert_eq!(h.sim.score.attempts, 1);

        h.sim.run_until_settled(&h.court, &h.tweaks, &mut h.bus, 2000);
        assert!(!h.sim.ball.airborne);
        assert!(h.sim.attempt.is_none());
        assert_eq!(h.sim.score.made, 1);
        assert_eq!(h.sim.score.points, 2);

        let names = h.event_names();
        assert_eq!(names[0], "shot_release");
        assert!(names.contains(&"swish"));
        assert_eq!(*names.last().unwrap(), "settled");
    }

    #[test]
    fn test_linear_model_banks_in() {
        let mut h = Harness::new();
        h.tweaks.shot_model = crate::tuning::ShotModel::Linear;

        for (x, power) in [(2.0, 0.95), (5.0, 0.85), (10.0, 0.65)] {
            assert!(h.sim.place_ball(x, 0.0, &h.court));
            h.input.set_power(power);
            h.input.shoot_pressed = true;
            h.tick();
            h.sim.run_until_settled(&h.court, &h.tweaks, &mut h.bus, 2000);

            let names = h.event_names();
            let board = names.iter().position(|n| *n == "backboard_touch");
            let made = names.iter().position(|n| *n == "assisted");
            assert!(board.is_some() && made.is_some(), "x = {}: {:?}", x, names);
            assert!(board < made);
        }
        assert_eq!(h.sim.score.attempts, 3);
        assert_eq!(h.sim.score.made, 3);
    }

    #[test]
    fn test_shoot_ignored_while_airborne() {
        let mut h = Harness::new();
        h.input.shoot_pressed = true;
        h.tick();
        let velocity = h.sim.ball.velocity;
        h.input.shoot_pressed = true;
        h.tick();
        assert_eq!(h.sim.score.attempts, 1);
        assert!(h.sim.ball.velocity.x <= velocity.x);
        assert!(!h.input.shoot_pressed);
    }

    #[test]
    fn test_reset_mid_flight_keeps_score() {
        let mut h = Harness::new();
        h.input.set_power(0.8);
        h.input.shoot_pressed = true;
        for _ in 0..20 {
            h.tick();
        }
        assert!(h.sim.ball.airborne);

        h.input.reset_pressed = true;
        h.tick();
        assert!(!h.sim.ball.airborne);
        assert!(h.sim.attempt.is_none());
        assert!(h.sim.trail.is_empty());
        assert_eq!(h.sim.ball.position, GameSim::spawn_position(&h.tweaks));
        assert_eq!(h.sim.ball.velocity, Vec3::ZERO);
        assert_eq!(h.input.shot_power, DEFAULT_SHOT_POWER);
        assert_eq!(h.sim.score.attempts, 1);
        assert_eq!(h.sim.score.made, 0);
        assert!(h.event_names().contains(&"reset"));
    }

    #[test]
    fn test_power_steps_emit_change() {
        let mut h = Harness::new();
        h.input.power_steps = 2;
        h.tick();
        assert!((h.input.shot_power - 0.6).abs() < 1e-5);
        assert_eq!(h.event_names(), vec!["power_change"]);

        h.input.set_power(1.0);
        h.input.power_steps = 1;
        h.tick();
        assert!(h.event_names().is_empty());
    }

    #[test]
    fn test_grounded_movement_steps_and_clamps() {
        let mut h = Harness::new();
        h.input.move_right = true;
        h.tick();
        assert!((h.sim.ball.position.x - BALL_MOVE_STEP).abs() < 1e-6);
        for _ in 0..500 {
            h.tick();
        }
        assert_eq!(h.sim.ball.position.x, COURT_HALF_LENGTH - BALL_RADIUS);
        assert_eq!(h.sim.ball.position.y, h.tweaks.rest_height());
    }

    #[test]
    fn test_drop_through_rim_scores_once() {
        let mut h = Harness::new();
        let rim = h.court.hoop(Basket::Right).rim_center;
        h.sim.ball.position = rim + Vec3::Y * 1.5;
        h.sim
            .release_with_velocity(Basket::Right, Vec3::ZERO, 0.0, &mut h.bus);

        h.sim.run_until_settled(&h.court, &h.tweaks, &mut h.bus, 2000);
        let names = h.event_names();
        assert_eq!(names.iter().filter(|n| **n == "swish").count(), 1);
        assert_eq!(h.sim.score.made, 1);
        assert!(h.sim.score.made <= h.sim.score.attempts);
    }

    #[test]
    fn test_flight_timeout_force_settles() {
        let mut h = Harness::new();
        h.tweaks.max_flight_secs = 0.51;
        // Straight up from center court, far from both hoops
        h.sim
            .release_with_velocity(Basket::Right, Vec3::new(0.0, 20.0, 0.0), 1.0, &mut h.bus);
        let ticks = h.sim.run_until_settled(&h.court, &h.tweaks, &mut h.bus, 2000);
        assert_eq!(ticks, 31);
        assert!(!h.sim.ball.airborne);
        assert_eq!(h.sim.ball.position.y, h.tweaks.rest_height());
        assert_eq!(*h.event_names().last().unwrap(), "settled");
    }

    #[test]
    fn test_airborne_y_never_below_rest() {
        let mut h = Harness::new();
        h.input.set_power(1.0);
        h.input.shoot_pressed = true;
        h.tick();
        for _ in 0..1200 {
            h.tick();
            assert!(h.sim.ball.position.y >= h.tweaks.rest_height() - 1e-6);
            assert!(h.sim.ball.position.x.abs() <= COURT_HALF_LENGTH - BALL_RADIUS + 1e-5);
            assert!(h.sim.ball.position.z.abs() <= COURT_HALF_WIDTH - BALL_RADIUS + 1e-5);
            assert_eq!(h.sim.attempt.is_some(), h.sim.ball.airborne);
        }
    }
}
