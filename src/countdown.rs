//! Game clock - 10 minute countdown shown in the HUD
//!
//! Runs on wall-clock time in `Update`, independent of the fixed physics step.

use bevy::prelude::*;

use crate::constants::GAME_CLOCK_SECS;
use crate::events::{EventBus, GameEvent};
use crate::helpers::format_clock;

/// Resource tracking the game clock
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameClock {
    /// Whole seconds left
    pub remaining: u32,
    /// Partial second carried between frames
    accumulator: f32,
    expired: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(GAME_CLOCK_SECS)
    }
}

impl GameClock {
    pub fn new(secs: u32) -> Self {
        Self {
            remaining: secs,
            accumulator: 0.0,
            expired: false,
        }
    }

    /// Add elapsed time; decrements once per accumulated second.
    /// Emits `ClockExpired` the first time the clock reaches zero.
    pub fn advance(&mut self, dt: f32, bus: &mut EventBus) {
        if self.expired || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.accumulator += dt;
        while self.accumulator >= 1.0 && self.remaining > 0 {
            self.accumulator -= 1.0;
            self.remaining -= 1;
        }
        if self.remaining == 0 {
            self.expired = true;
            self.accumulator = 0.0;
            bus.emit(GameEvent::ClockExpired);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// "MM:SS"
    pub fn label(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Update system: tick the clock with frame time
pub fn advance_game_clock(time: Res<Time>, mut clock: ResMut<GameClock>, mut bus: ResMut<EventBus>) {
    clock.advance(time.delta_secs(), &mut bus);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrements_per_whole_second() {
        let mut clock = GameClock::default();
        let mut bus = EventBus::new();
        clock.advance(0.5, &mut bus);
        assert_eq!(clock.remaining, 600);
        clock.advance(0.75, &mut bus);
        assert_eq!(clock.remaining, 599);
        assert_eq!(clock.label(), "09:59");
        clock.advance(2.0, &mut bus);
        assert_eq!(clock.remaining, 597);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_expires_once() {
        let mut clock = GameClock::new(2);
        let mut bus = EventBus::new();
        clock.advance(5.0, &mut bus);
        assert_eq!(clock.remaining, 0);
        assert!(clock.is_expired());
        assert_eq!(clock.label(), "00:00");
        clock.advance(1.0, &mut bus);

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, GameEvent::ClockExpired);
    }

    #[test]
    fn test_ignores_bad_dt() {
        let mut clock = GameClock::new(10);
        let mut bus = EventBus::new();
        clock.advance(f32::NAN, &mut bus);
        clock.advance(-3.0, &mut bus);
        assert_eq!(clock, GameClock::new(10));
    }
}
