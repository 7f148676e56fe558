//! Drain the event bus once per frame into the log, banner and sound cues

use bevy::prelude::*;

use super::feedback::FeedbackBanner;
use super::sound::{SoundAssets, SoundCue, play_cue};
use crate::events::{EventBus, EventLogger, GameEvent};
use crate::simulation::GameSim;

pub fn dispatch_events(
    mut commands: Commands,
    mut bus: ResMut<EventBus>,
    mut logger: ResMut<EventLogger>,
    mut banner: ResMut<FeedbackBanner>,
    sounds: Option<Res<SoundAssets>>,
    sim: Res<GameSim>,
) {
    for bus_event in bus.drain() {
        logger.log(bus_event.time_ms, &bus_event.event);
        if banner.show_for(&bus_event.event) {
            debug!("{} at {}ms", bus_event.event.name(), bus_event.time_ms);
        }
        if let (Some(sounds), Some(cue)) = (&sounds, SoundCue::for_event(&bus_event.event)) {
            play_cue(&mut commands, sounds, cue);
        }
    }

    let now = bus.elapsed_ms();
    if sim.ball.airborne && logger.should_log_tick(now) {
        logger.log(
            now,
            &GameEvent::Tick {
                frame: sim.frame,
                ball_pos: sim.ball.position.into(),
                ball_vel: sim.ball.velocity.into(),
                airborne: true,
            },
        );
    }
}
