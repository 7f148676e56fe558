//! UI module - HUD text, shot feedback banner, sound cues and event dispatch

mod dispatch;
mod feedback;
mod hud;
mod sound;

pub use dispatch::*;
pub use feedback::*;
pub use hud::*;
pub use sound::*;
