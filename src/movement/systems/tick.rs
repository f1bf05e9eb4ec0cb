//! Movement domain: the fixed-tick controller system.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::controller::run_tick;
use crate::movement::strategy::MovementContext;
use crate::movement::{
    CharacterIntent, CharacterState, ControllerRole, MovementTuning, Player, Strategy,
};

/// Run one controller tick for every character and commit its velocity.
pub(crate) fn run_character_controllers(
    time: Res<Time>,
    gravity: Res<Gravity>,
    players: Query<&Transform, With<Player>>,
    mut characters: Query<(
        Entity,
        &Transform,
        &ControllerRole,
        &MovementTuning,
        &mut CharacterState,
        &mut Strategy,
        &mut CharacterIntent,
        &mut LinearVelocity,
    )>,
) {
    let dt = time.delta_secs();
    let player_position = players.iter().next().map(|t| t.translation.truncate());

    for (entity, transform, role, tuning, mut state, mut strategy, mut intent, mut velocity) in
        &mut characters
    {
        let target = match role {
            ControllerRole::Enemy => player_position,
            ControllerRole::Player => None,
        };

        let mut ctx = MovementContext {
            role: *role,
            intent: &mut *intent,
            tuning,
            position: transform.translation.truncate(),
            target,
        };

        let outcome = run_tick(
            &mut *strategy,
            &mut state,
            &mut ctx,
            velocity.0,
            gravity.0.y,
            dt,
        );
        velocity.0 = outcome.velocity;

        if outcome.flipped {
            debug!("{:?} turned to face {:?}", entity, state.facing);
        }
    }
}
