//! Input module - PlayerInput resource and capture_input system

use bevy::prelude::*;

use crate::constants::*;

/// Held movement flags plus latched one-shot actions.
///
/// Written in `Update`, consumed by the fixed-step simulation. One-shot
/// actions stay latched until the next tick takes them so a quick tap between
/// two ticks is never lost.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_forward: bool, // Toward -Z (away from the camera)
    pub move_back: bool,
    /// Current shot power in 0..=1
    pub shot_power: f32,
    pub shoot_pressed: bool,
    pub reset_pressed: bool,
    /// Net power steps requested since the last tick (+W / -S)
    pub power_steps: i32,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            move_left: false,
            move_right: false,
            move_forward: false,
            move_back: false,
            shot_power: DEFAULT_SHOT_POWER,
            shoot_pressed: false,
            reset_pressed: false,
            power_steps: 0,
        }
    }
}

impl PlayerInput {
    /// Held direction as (x, z), each component in -1..=1
    pub fn direction(&self) -> Vec2 {
        let x = self.move_right as i32 - self.move_left as i32;
        let z = self.move_back as i32 - self.move_forward as i32;
        Vec2::new(x as f32, z as f32)
    }

    /// Set power, clamped to 0..=1. Non-finite values are ignored.
    /// Returns true if the stored power changed.
    pub fn set_power(&mut self, power: f32) -> bool {
        if !power.is_finite() {
            return false;
        }
        let clamped = power.clamp(0.0, 1.0);
        let changed = clamped != self.shot_power;
        self.shot_power = clamped;
        changed
    }

    pub fn adjust_power(&mut self, delta: f32) -> bool {
        self.set_power(self.shot_power + delta)
    }

    pub fn take_shoot(&mut self) -> bool {
        std::mem::take(&mut self.shoot_pressed)
    }

    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_pressed)
    }

    pub fn take_power_steps(&mut self) -> i32 {
        std::mem::take(&mut self.power_steps)
    }

    /// Clear latched actions (used on reset)
    pub fn clear_actions(&mut self) {
        self.shoot_pressed = false;
        self.power_steps = 0;
    }
}

/// Runs in Update to capture key and gamepad state before it's cleared
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut input: ResMut<PlayerInput>,
) {
    let held = |key: KeyCode, button: GamepadButton| {
        keyboard.pressed(key) || gamepads.iter().any(|gp| gp.pressed(button))
    };
    let tapped = |key: KeyCode, button: GamepadButton| {
        keyboard.just_pressed(key) || gamepads.iter().any(|gp| gp.just_pressed(button))
    };

    input.move_left = held(KeyCode::ArrowLeft, GamepadButton::DPadLeft);
    input.move_right = held(KeyCode::ArrowRight, GamepadButton::DPadRight);
    input.move_forward = held(KeyCode::ArrowUp, GamepadButton::DPadUp);
    input.move_back = held(KeyCode::ArrowDown, GamepadButton::DPadDown);

    if tapped(KeyCode::KeyW, GamepadButton::RightTrigger) {
        input.power_steps += 1;
    }
    if tapped(KeyCode::KeyS, GamepadButton::LeftTrigger) {
        input.power_steps -= 1;
    }

    // Latch until consumed by the fixed step
    if tapped(KeyCode::Space, GamepadButton::South) {
        input.shoot_pressed = true;
    }
    if tapped(KeyCode::KeyR, GamepadButton::Start) {
        input.reset_pressed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_clamps_and_rejects_nan() {
        let mut input = PlayerInput::default();
        assert!(input.set_power(1.7));
        assert_eq!(input.shot_power, 1.0);
        assert!(!input.adjust_power(POWER_STEP));
        assert!(!input.set_power(f32::NAN));
        assert_eq!(input.shot_power, 1.0);
        assert!(input.set_power(-3.0));
        assert_eq!(input.shot_power, 0.0);
    }

    #[test]
    fn test_direction_cancels_opposites() {
        let input = PlayerInput {
            move_left: true,
            move_right: true,
            move_forward: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_latches_clear_on_take() {
        let mut input = PlayerInput {
            shoot_pressed: true,
            power_steps: 2,
            ..Default::default()
        };
        assert!(input.take_shoot());
        assert!(!input.take_shoot());
        assert_eq!(input.take_power_steps(), 2);
        assert_eq!(input.take_power_steps(), 0);
    }
}
