//! Shot event queue
//!
//! `GameSim::tick` pushes release, contact and outcome events here. The
//! dispatcher empties the queue once per frame and fans each entry out to
//! the event log, the banner and the sound cues. Headless callers (sweep,
//! scenario runner) own their own queue and drain it themselves.

use bevy::prelude::*;

use super::types::GameEvent;

/// One queued event, stamped with the app clock at emission
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    pub time_ms: u32,
    pub event: GameEvent,
}

#[derive(Resource, Debug)]
pub struct EventBus {
    queue: Vec<BusEvent>,
    now_ms: u32,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Vec::with_capacity(8),
            now_ms: 0,
        }
    }

    /// Set the stamp for subsequent emissions. Negative or NaN seconds clamp to 0.
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.now_ms = (elapsed_secs.max(0.0) * 1000.0) as u32;
    }

    pub fn emit(&mut self, event: GameEvent) {
        let time_ms = self.now_ms;
        self.queue.push(BusEvent { time_ms, event });
    }

    pub fn peek(&self) -> &[BusEvent] {
        &self.queue
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Short names of the queued events, oldest first
    pub fn names(&self) -> Vec<&'static str> {
        self.queue.iter().map(|e| e.event.name()).collect()
    }

    /// How many queued events carry `name`
    pub fn count(&self, name: &str) -> usize {
        self.queue.iter().filter(|e| e.event.name() == name).count()
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.now_ms
    }
}

pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Basket;

    #[test]
    fn test_stamp_follows_clock() {
        let mut bus = EventBus::default();
        bus.emit(GameEvent::Reset);
        bus.update_time(2.25);
        bus.emit(GameEvent::RimTouch { hoop: Basket::Left });

        let stamps: Vec<u32> = bus.peek().iter().map(|e| e.time_ms).collect();
        assert_eq!(stamps, vec![0, 2250]);
        assert_eq!(bus.elapsed_ms(), 2250);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut bus = EventBus::new();
        bus.emit(GameEvent::Bounce { speed: 4.0 });
        assert!(bus.has_pending());

        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_names_and_count_keep_order() {
        let mut bus = EventBus::new();
        bus.emit(GameEvent::RimTouch { hoop: Basket::Right });
        bus.emit(GameEvent::Bounce { speed: 3.0 });
        bus.emit(GameEvent::Bounce { speed: 1.5 });
        bus.emit(GameEvent::Settled { scored: false });

        assert_eq!(bus.names(), vec!["rim_touch", "bounce", "bounce", "settled"]);
        assert_eq!(bus.count("bounce"), 2);
        assert_eq!(bus.count("swish"), 0);
    }

    #[test]
    fn test_negative_time_clamps_to_zero() {
        let mut bus = EventBus::new();
        bus.update_time(-1.0);
        assert_eq!(bus.elapsed_ms(), 0);
    }
}
