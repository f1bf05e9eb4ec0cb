//! Movement shared by the player's animals: knockback and horizontal control.

use bevy::prelude::*;

use crate::movement::components::{CharacterState, Facing};
use crate::movement::strategy::MovementContext;

/// Result of an animal's jump resolution for one tick.
pub(super) struct Jump {
    pub direction: Vec2,
    /// The jump started a hitstun window and owns this tick's horizontal
    /// component.
    pub starts_hitstun: bool,
}

impl Jump {
    pub fn none() -> Self {
        Self::vertical(0.0)
    }

    pub fn vertical(dy: f32) -> Self {
        Self {
            direction: Vec2::new(0.0, dy),
            starts_hitstun: false,
        }
    }
}

/// Player movement for one tick, with the animal-specific jump in `jump`.
///
/// A pending knockback takes over the whole tick: inputs are ignored and the
/// knockback hitstun starts. Otherwise the jump is resolved first and the
/// horizontal component is added on top. A tick that starts one hitstun
/// window still counts down the other.
pub(super) fn determine_player_movement(
    state: &mut CharacterState,
    ctx: &mut MovementContext,
    jump: impl FnOnce(&mut CharacterState, &mut MovementContext) -> Jump,
) -> Vec2 {
    if let Some(knockback) = state.pending_knockback.take() {
        state.wall_hitstun.tick();
        state
            .knockback_hitstun
            .start(ctx.tuning.knockback_hitstun_ticks, knockback.direction);
        debug!(
            "Knockback from {:?}: pushed {:?} for {} ticks",
            knockback.source, knockback.direction, ctx.tuning.knockback_hitstun_ticks
        );
        return Vec2::new(
            push(knockback.direction, ctx.tuning.knockback_sideways_force),
            ctx.tuning.knockback_upwards_force,
        );
    }

    let jump = jump(state, ctx);
    if jump.starts_hitstun {
        state.knockback_hitstun.tick();
        return jump.direction;
    }

    let mut direction = jump.direction;
    direction.x += horizontal_movement(state, ctx);
    direction
}

/// Horizontal control, overridden while a hitstun window is counting down.
///
/// Every active window counts down once per tick; knockback takes priority
/// over wall-jump recovery when both are active.
pub(super) fn horizontal_movement(state: &mut CharacterState, ctx: &MovementContext) -> f32 {
    let input = ctx.intent.horizontal;
    let knockback = state.knockback_hitstun.tick();
    let wall_jump = state.wall_hitstun.tick();

    if let Some(direction) = knockback {
        push(direction, ctx.tuning.knockback_sideways_force)
            + input * ctx.tuning.knockback_input_influence
    } else if let Some(direction) = wall_jump {
        push(direction, ctx.tuning.wall_jump_sideways_force)
            + input * ctx.tuning.wall_jump_input_influence
    } else {
        input
    }
}

fn push(direction: Facing, force: f32) -> f32 {
    direction.sign() * force
}
