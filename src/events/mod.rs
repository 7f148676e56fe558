//! Game event logging system
//!
//! Provides a compact text format for logging shot and contact events. The
//! EventBus decouples the simulation step from the log file, HUD feedback and
//! sound cues.

mod bus;
mod format;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use format::{parse_event, serialize_event};
pub use logger::{
    EventLogConfig, EventLogger, parse_evlog_content, read_evlog, session_timestamp,
};
pub use types::GameEvent;
