//! Crow: the double-jumping animal.

use bevy::prelude::*;

use crate::movement::components::{CharacterState, ControllerRole};
use crate::movement::strategy::player::{Jump, determine_player_movement};
use crate::movement::strategy::{MovementContext, MovementStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct CrowStrategy;

impl MovementStrategy for CrowStrategy {
    fn role(&self) -> Option<ControllerRole> {
        Some(ControllerRole::Player)
    }

    fn determine_movement(
        &mut self,
        state: &mut CharacterState,
        ctx: &mut MovementContext,
    ) -> Vec2 {
        determine_player_movement(state, ctx, crow_jump)
    }
}

/// Grounded jumps are free; an airborne jump spends the double jump.
fn crow_jump(state: &mut CharacterState, ctx: &mut MovementContext) -> Jump {
    if !ctx.intent.take_jump() {
        return Jump::none();
    }

    if state.is_grounded() {
        debug!("Crow jump");
        Jump::vertical(ctx.tuning.jump_force)
    } else if state.double_jump_available {
        state.double_jump_available = false;
        debug!("Crow double jump");
        Jump::vertical(ctx.tuning.jump_force)
    } else {
        Jump::none()
    }
}
