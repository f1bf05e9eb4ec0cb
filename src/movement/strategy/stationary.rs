//! Stationary: a character that never moves.

use bevy::prelude::*;

use crate::movement::components::{CharacterState, ControllerRole};
use crate::movement::strategy::{MovementContext, MovementStrategy};

/// Never moves. Used for characters with no movement configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct StationaryStrategy;

impl MovementStrategy for StationaryStrategy {
    fn role(&self) -> Option<ControllerRole> {
        None
    }

    fn determine_movement(
        &mut self,
        _state: &mut CharacterState,
        _ctx: &mut MovementContext,
    ) -> Vec2 {
        Vec2::ZERO
    }
}
