//! Ball module - state, physics, trail, and rendering

mod components;
mod physics;
mod render;
mod trail;

pub use components::*;
pub use physics::*;
pub use render::*;
pub use trail::*;
