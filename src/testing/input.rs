//! Scripted input injection for tests

use bevy::prelude::*;
use std::collections::HashMap;

use super::parser::FrameInput;
use crate::input::PlayerInput;

/// Resource holding scripted inputs for a test
#[derive(Resource, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> input changes
    pub frames: HashMap<u64, FrameInput>,
    /// Current frame number
    pub current_frame: u64,
    /// Maximum frame to run
    pub max_frame: u64,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        let mut frames = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            max_frame = max_frame.max(fi.frame);
            frames.insert(fi.frame, fi.clone());
        }

        Self {
            frames,
            current_frame: 0,
            max_frame,
        }
    }

    /// Set max frame (for state assertions)
    pub fn set_max_frame(&mut self, frame: u64) {
        self.max_frame = self.max_frame.max(frame);
    }

    /// Apply this frame's changes to the player input and advance.
    /// Held flags persist; one-shot actions are latched like a key tap.
    pub fn advance_frame(&mut self, input: &mut PlayerInput) {
        if let Some(changes) = self.frames.get(&self.current_frame) {
            if let Some(v) = changes.move_left {
                input.move_left = v;
            }
            if let Some(v) = changes.move_right {
                input.move_right = v;
            }
            if let Some(v) = changes.move_forward {
                input.move_forward = v;
            }
            if let Some(v) = changes.move_back {
                input.move_back = v;
            }
            input.shoot_pressed |= changes.shoot;
            input.reset_pressed |= changes.reset;
            input.power_steps += changes.power_up as i32 - changes.power_down as i32;
        }

        self.current_frame += 1;
    }

    /// Check if simulation should continue
    pub fn should_continue(&self) -> bool {
        self.current_frame <= self.max_frame
    }
}

/// Update system: feed this frame's scripted input into `PlayerInput`
pub fn input_injection(mut scripted: ResMut<ScriptedInputs>, mut input: ResMut<PlayerInput>) {
    scripted.advance_frame(&mut input);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_flags_persist_and_taps_latch() {
        let inputs = vec![
            FrameInput {
                frame: 0,
                move_left: Some(true),
                shoot: true,
                power_up: 3,
                power_down: 1,
                ..Default::default()
            },
            FrameInput {
                frame: 2,
                move_left: Some(false),
                ..Default::default()
            },
        ];
        let mut scripted = ScriptedInputs::from_inputs(&inputs);
        let mut input = PlayerInput::default();

        scripted.advance_frame(&mut input);
        assert!(input.move_left);
        assert!(input.shoot_pressed);
        assert_eq!(input.power_steps, 2);

        scripted.advance_frame(&mut input);
        assert!(input.move_left);

        scripted.advance_frame(&mut input);
        assert!(!input.move_left);
        assert!(!scripted.should_continue());
    }
}
