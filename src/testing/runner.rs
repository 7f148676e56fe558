//! Test execution engine

use bevy::prelude::*;

use crate::events::EventBus;
use crate::input::PlayerInput;
use crate::simulation::{GameSim, simulation_tick};
use crate::tuning::{self, PhysicsTweaks};
use crate::world::{Basket, Court};

use super::assertions::{AssertionError, CapturedEvent, WorldState, check_forbidden, check_sequence, check_state};
use super::input::{ScriptedInputs, input_injection};
use super::parser::{BallSetup, TestDefinition};

/// Frames run when a test has no inputs or state checks
const DEFAULT_TEST_FRAMES: u64 = 60;

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Resource to capture events during test
#[derive(Resource, Default)]
struct EventCapture {
    events: Vec<CapturedEvent>,
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let mut tweaks = PhysicsTweaks::default();
    if let Some(path) = &test.setup.tuning_file
        && let Err(message) = tuning::apply_tuning_file(path, &mut tweaks)
    {
        return TestResult::Error { message };
    }
    if let Some(model) = test.setup.shot_model {
        tweaks.shot_model = model;
    }

    let court = Court::default();
    let mut sim = GameSim::new(&tweaks);
    let mut bus = EventBus::new();
    let mut input = PlayerInput::default();
    if let Some(power) = test.setup.power {
        input.set_power(power);
    }

    if let Some(ball) = &test.setup.ball
        && let Err(message) = setup_ball(&mut sim, ball, &court, &tweaks, input.shot_power, &mut bus)
    {
        return TestResult::Error { message };
    }

    let mut scripted_inputs = ScriptedInputs::from_inputs(&test.input);
    for state in &test.expect.state {
        scripted_inputs.set_max_frame(state.after_frame);
    }
    if scripted_inputs.max_frame == 0 {
        scripted_inputs.max_frame = DEFAULT_TEST_FRAMES;
    }

    // No plugins: the main schedule alone drives Update once per app.update()
    let mut app = App::new();
    app.insert_resource(court);
    app.insert_resource(tweaks);
    app.insert_resource(sim);
    app.insert_resource(bus);
    app.insert_resource(input);
    app.insert_resource(scripted_inputs);
    app.init_resource::<EventCapture>();
    app.add_systems(Update, (input_injection, simulation_tick, event_capture).chain());

    let mut state_checks = test.expect.state.clone();
    state_checks.sort_by_key(|s| s.after_frame);
    let mut next_check = 0;
    let mut frame = 0;

    while app.world().resource::<ScriptedInputs>().should_continue() {
        app.update();
        frame = app.world().resource::<ScriptedInputs>().current_frame - 1;

        while next_check < state_checks.len() && state_checks[next_check].after_frame <= frame {
            let world = app.world();
            let state = WorldState::capture(
                world.resource::<GameSim>(),
                world.resource::<PlayerInput>().shot_power,
                &world.resource::<EventCapture>().events,
            );
            if let Err(error) = check_state(&state_checks[next_check], &state) {
                return TestResult::Fail { error };
            }
            next_check += 1;
        }
    }

    let captured = &app.world().resource::<EventCapture>().events;
    if let Err(error) = check_sequence(&test.expect.sequence, captured) {
        return TestResult::Fail { error };
    }
    if let Err(error) = check_forbidden(&test.expect.forbid, captured) {
        return TestResult::Fail { error };
    }

    TestResult::Pass { frames: frame + 1 }
}

/// Place the ball, and launch it when the scenario names a target hoop
fn setup_ball(
    sim: &mut GameSim,
    ball: &BallSetup,
    court: &Court,
    tweaks: &PhysicsTweaks,
    power: f32,
    bus: &mut EventBus,
) -> Result<(), String> {
    sim.place_ball(ball.x, ball.z, court);

    let Some(target_name) = &ball.launch_target else {
        return Ok(());
    };
    let target = Basket::from_name(target_name)
        .ok_or_else(|| format!("Unknown launch target '{}'", target_name))?;
    if let Some(y) = ball.y {
        sim.ball.position.y = y.max(tweaks.rest_height());
    }
    if !sim.release_with_velocity(target, Vec3::from(ball.velocity), power, bus) {
        return Err(format!("Invalid launch velocity {:?}", ball.velocity));
    }
    Ok(())
}

/// Drain the bus after each step, stamping events with the input frame
fn event_capture(
    scripted: Res<ScriptedInputs>,
    mut bus: ResMut<EventBus>,
    mut capture: ResMut<EventCapture>,
) {
    let frame = scripted.current_frame.saturating_sub(1);
    for bus_event in bus.drain() {
        capture
            .events
            .push(CapturedEvent::from_game_event(frame, &bus_event.event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parser::parse_test_str;

    fn run(toml: &str) -> TestResult {
        let def = parse_test_str(toml).unwrap();
        run_test(&def)
    }

    #[test]
    fn test_idle_ball_passes_default_frames() {
        let result = run(r#"
name = "Idle"
[expect]
forbid = ["shot_release"]
"#);
        assert!(matches!(result, TestResult::Pass { frames: 61 }), "{:?}", result);
    }

    #[test]
    fn test_drop_through_counts_as_swish() {
        let result = run(r#"
name = "Drop"
[setup.ball]
x = 14.45
y = 4.5
launch_target = "right"

[[expect.sequence]]
event = "shot_release"
frame_max = 0

[[expect.sequence]]
event = "swish"
hoop = "right"

[[expect.state]]
after_frame = 60
checks = ["score.made = 1", "score.points = 2"]
"#);
        assert!(matches!(result, TestResult::Pass { .. }), "{:?}", result);
    }

    #[test]
    fn test_failed_state_check_reports_fail() {
        let result = run(r#"
name = "Wrong"
[[expect.state]]
after_frame = 5
checks = ["score.made = 1"]
"#);
        assert!(matches!(result, TestResult::Fail { .. }));
    }

    #[test]
    fn test_unknown_launch_target_is_error() {
        let result = run(r#"
name = "Bad"
[setup.ball]
launch_target = "middle"
[expect]
"#);
        assert!(matches!(result, TestResult::Error { .. }));
    }
}
