//! Shooting module - target selection and launch velocity

mod trajectory;

pub use trajectory::*;
