//! Cat: the wall-jumping animal.

use bevy::prelude::*;

use crate::movement::components::{CharacterState, ControllerRole, Facing};
use crate::movement::strategy::player::{Jump, determine_player_movement};
use crate::movement::strategy::{MovementContext, MovementStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct CatStrategy;

impl MovementStrategy for CatStrategy {
    fn role(&self) -> Option<ControllerRole> {
        Some(ControllerRole::Player)
    }

    fn determine_movement(
        &mut self,
        state: &mut CharacterState,
        ctx: &mut MovementContext,
    ) -> Vec2 {
        determine_player_movement(state, ctx, cat_jump)
    }
}

fn cat_jump(state: &mut CharacterState, ctx: &mut MovementContext) -> Jump {
    if !ctx.intent.take_jump() {
        return Jump::none();
    }

    if state.is_grounded() {
        debug!("Cat jump");
        return Jump::vertical(ctx.tuning.jump_force);
    }

    // Jump away from the wall; a left wall pushes right.
    let away = if state.is_touching_wall_left() {
        Facing::Right
    } else if state.is_touching_wall_right() {
        Facing::Left
    } else {
        return Jump::none();
    };

    let tuning = ctx.tuning;
    state.double_jump_available = true;
    state
        .wall_hitstun
        .start(tuning.wall_jump_recovery_ticks, away);
    debug!(
        "Wall jump {:?}: recovery {} ticks",
        away, tuning.wall_jump_recovery_ticks
    );

    Jump {
        direction: Vec2::new(
            away.sign() * tuning.wall_jump_sideways_force,
            tuning.wall_jump_upwards_force,
        ),
        starts_hitstun: true,
    }
}
