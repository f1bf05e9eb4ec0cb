//! Patrol between two walls at constant speed.

use bevy::prelude::*;

use crate::movement::components::{CharacterState, ControllerRole, Facing};
use crate::movement::strategy::{MovementContext, MovementStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct BackAndForthStrategy;

impl MovementStrategy for BackAndForthStrategy {
    fn role(&self) -> Option<ControllerRole> {
        Some(ControllerRole::Enemy)
    }

    fn determine_movement(
        &mut self,
        state: &mut CharacterState,
        ctx: &mut MovementContext,
    ) -> Vec2 {
        let speed = ctx.tuning.movement_speed;

        // Heads left after bumping a wall on the right, or keeps heading left
        // while no wall is touched.
        let heading_left = state.is_touching_wall_right()
            || (!state.is_touching_wall_left() && state.facing == Facing::Left);

        if heading_left {
            Vec2::new(-speed, 0.0)
        } else {
            Vec2::new(speed, 0.0)
        }
    }
}
