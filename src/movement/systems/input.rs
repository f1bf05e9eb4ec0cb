//! Movement domain: input sampling for the player's intent.

use bevy::prelude::*;

use crate::movement::{CharacterIntent, InputBindings, MovementTuning, Player};

/// Sample the keyboard every frame. Requests are only latched here; the fixed
/// tick consumes them.
pub(crate) fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<InputBindings>,
    mut query: Query<(&mut CharacterIntent, &MovementTuning), With<Player>>,
) {
    let axis = bindings.axis(&keyboard);
    let jump = bindings.jump_just_pressed(&keyboard);
    let switch = bindings.switch_just_pressed(&keyboard);

    for (mut intent, tuning) in &mut query {
        intent.horizontal = axis * tuning.movement_speed;
        intent.latch_jump(jump);
        intent.latch_switch(switch);
    }
}
