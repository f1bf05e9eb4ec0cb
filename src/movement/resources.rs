//! Movement domain: tuning and input bindings.

use bevy::prelude::*;

use crate::content::MovementDef;

/// Movement tuning for one character. Forces are in world units per second,
/// durations are in fixed ticks.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovementTuning {
    pub movement_speed: f32,
    pub jump_force: f32,
    pub apply_fall_multiplier: bool,
    pub fall_multiplier: f32,
    pub wall_jump_upwards_force: f32,
    pub wall_jump_sideways_force: f32,
    pub wall_jump_recovery_ticks: u32,
    /// Fraction of horizontal input kept during wall-jump recovery (0..=1)
    pub wall_jump_input_influence: f32,
    pub knockback_upwards_force: f32,
    pub knockback_sideways_force: f32,
    pub knockback_hitstun_ticks: u32,
    /// Fraction of horizontal input kept during knockback hitstun (0..=1)
    pub knockback_input_influence: f32,
    /// Horizontal speed below which facing never flips
    pub facing_deadzone: f32,
    /// Touching a wall while airborne refunds the double jump
    pub wall_touch_refunds_double_jump: bool,
    /// Minimum normal component for a contact to count as ground or wall
    pub contact_normal_threshold: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self::from_def(&MovementDef::default())
    }
}

impl MovementTuning {
    pub fn from_def(def: &MovementDef) -> Self {
        Self {
            movement_speed: def.movement_speed,
            jump_force: def.jump_force,
            apply_fall_multiplier: def.apply_fall_multiplier,
            fall_multiplier: def.fall_multiplier,
            wall_jump_upwards_force: def.wall_jump_upwards_force,
            wall_jump_sideways_force: def.wall_jump_sideways_force,
            wall_jump_recovery_ticks: def.wall_jump_recovery_ticks,
            wall_jump_input_influence: def.wall_jump_input_influence.clamp(0.0, 1.0),
            knockback_upwards_force: def.knockback_upwards_force,
            knockback_sideways_force: def.knockback_sideways_force,
            knockback_hitstun_ticks: def.knockback_hitstun_ticks,
            knockback_input_influence: def.knockback_input_influence.clamp(0.0, 1.0),
            facing_deadzone: def.facing_deadzone.abs(),
            wall_touch_refunds_double_jump: def.wall_touch_refunds_double_jump,
            contact_normal_threshold: def.contact_normal_threshold,
        }
    }

    /// Peak height of a grounded jump under the given gravity magnitude.
    /// Uses h = v^2 / (2g)
    pub fn single_jump_height(&self, gravity: f32) -> f32 {
        if gravity <= 0.0 {
            return 0.0;
        }
        self.jump_force * self.jump_force / (2.0 * gravity)
    }
}

/// Keyboard bindings for the player's controls.
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
    pub switch_animal: Vec<KeyCode>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            left: vec![KeyCode::ArrowLeft, KeyCode::KeyA],
            right: vec![KeyCode::ArrowRight, KeyCode::KeyD],
            jump: vec![KeyCode::KeyZ, KeyCode::Space],
            switch_animal: vec![KeyCode::KeyX],
        }
    }
}

impl InputBindings {
    /// Raw horizontal axis in [-1, 1]
    pub fn axis(&self, keyboard: &ButtonInput<KeyCode>) -> f32 {
        let mut x = 0.0;
        if keyboard.any_pressed(self.left.iter().copied()) {
            x -= 1.0;
        }
        if keyboard.any_pressed(self.right.iter().copied()) {
            x += 1.0;
        }
        x
    }

    pub fn jump_just_pressed(&self, keyboard: &ButtonInput<KeyCode>) -> bool {
        keyboard.any_just_pressed(self.jump.iter().copied())
    }

    pub fn switch_just_pressed(&self, keyboard: &ButtonInput<KeyCode>) -> bool {
        keyboard.any_just_pressed(self.switch_animal.iter().copied())
    }
}
