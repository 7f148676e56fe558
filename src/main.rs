//! Hoopshot - a single-ball basketball shooting sim built with Bevy
//!
//! Main entry point: app setup and system registration.

use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};
use hoopshot::{
    ConfigWatcher, Court, EventBus, EventLogger, FeedbackBanner, GameClock, GameSim, PhysicsTweaks,
    PlayerInput, ball, config_watcher, constants::*, countdown, events, input, simulation,
    tuning::{self, GAMEPLAY_TUNING_FILE, GameplayTuning},
    ui, world,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: bevy::window::WindowResolution::new(1280, 720),
                    title: "Hoopshot".into(),
                    ..default()
                }),
                ..default()
            }),
            FrameTimeDiagnosticsPlugin::default(),
        ))
        .insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .init_resource::<Court>()
        .init_resource::<PhysicsTweaks>()
        .init_resource::<GameSim>()
        .init_resource::<PlayerInput>()
        .init_resource::<EventBus>()
        .init_resource::<EventLogger>()
        .init_resource::<GameClock>()
        .init_resource::<FeedbackBanner>()
        .init_resource::<ConfigWatcher>()
        // Tuning must be applied before the ball mesh is sized from GameSim
        .add_systems(
            Startup,
            (
                load_tuning_and_start_log,
                (
                    world::setup_scene,
                    ball::spawn_ball_visuals,
                    ui::spawn_hud,
                    ui::spawn_feedback_text,
                    ui::load_sound_assets,
                ),
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                input::capture_input,
                events::update_event_bus_time,
                countdown::advance_game_clock,
                config_watcher::check_config_changes,
                ui::dispatch_events,
                ui::update_feedback_banner,
                ui::update_hud,
            )
                .chain(),
        )
        .add_systems(Update, (ball::sync_ball_visual, ball::sync_trail))
        .add_systems(FixedUpdate, simulation::simulation_tick)
        .add_systems(Last, flush_event_log_on_exit)
        .run();
}

/// Load tuning from disk, rebuild the sim with it, and open the event log
fn load_tuning_and_start_log(
    mut tweaks: ResMut<PhysicsTweaks>,
    mut sim: ResMut<GameSim>,
    mut logger: ResMut<EventLogger>,
) {
    let tuning = match tuning::load_gameplay_tuning_from_file(GAMEPLAY_TUNING_FILE) {
        Ok(tuning) => {
            info!("Loaded gameplay tuning from {}", GAMEPLAY_TUNING_FILE);
            tuning
        }
        Err(err) => {
            warn!("{} - using defaults", err);
            GameplayTuning::default()
        }
    };
    tuning.apply_to(&mut tweaks);
    *sim = GameSim::new(&tweaks);

    match logger.start_session(&events::session_timestamp()) {
        Ok(()) => logger.log_config(0, tuning),
        Err(err) => warn!("Event logging disabled: {}", err),
    }
}

fn flush_event_log_on_exit(mut exits: MessageReader<AppExit>, mut logger: ResMut<EventLogger>) {
    if exits.read().next().is_some() {
        logger.end_session();
    }
}
