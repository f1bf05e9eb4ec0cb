//! Movement domain: the per-tick character controller.
//!
//! One tick asks the active strategy for a direction, resolves the vertical
//! velocity, shapes the fall, commits velocity once and then re-evaluates
//! facing.

use bevy::prelude::*;

use crate::movement::components::{CharacterState, Facing};
use crate::movement::strategy::{MovementContext, MovementStrategy};

/// Outcome of one controller tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// The direction the strategy asked for, before shaping
    pub direction: Vec2,
    /// Velocity committed to the body
    pub velocity: Vec2,
    /// Facing toggled this tick
    pub flipped: bool,
}

/// Extra descent added while airborne and moving down.
///
/// `vy` is the vertical velocity about to be committed, after a zero request
/// was replaced by the body's current velocity. `gravity_y` is the engine's
/// (negative) vertical gravity; the engine already applies it once, so only
/// `multiplier - 1` of it is added.
pub fn apply_fall_multiplier(
    enabled: bool,
    grounded: bool,
    vy: f32,
    multiplier: f32,
    gravity_y: f32,
) -> f32 {
    if enabled && !grounded && vy < 0.0 {
        vy + gravity_y * (multiplier - 1.0)
    } else {
        vy
    }
}

/// Velocity for `direction` before fall shaping.
///
/// Horizontal speed is scaled by the tick duration. A zero vertical request
/// keeps the body's current vertical velocity so gravity keeps integrating.
pub fn commit_velocity(direction: Vec2, current: Vec2, dt: f32) -> Vec2 {
    let vy = if direction.y == 0.0 {
        current.y
    } else {
        direction.y
    };
    Vec2::new(direction.x * dt, vy)
}

/// Whether a character moving at `vx` should turn around.
pub fn should_flip(vx: f32, facing: Facing, deadzone: f32) -> bool {
    (vx > deadzone && facing == Facing::Left) || (vx < -deadzone && facing == Facing::Right)
}

/// Run one fixed tick of movement for a character.
pub fn run_tick(
    strategy: &mut impl MovementStrategy,
    state: &mut CharacterState,
    ctx: &mut MovementContext,
    current_velocity: Vec2,
    gravity_y: f32,
    dt: f32,
) -> TickOutcome {
    let direction = strategy.determine_movement(state, ctx);

    let tuning = ctx.tuning;
    let mut velocity = commit_velocity(direction, current_velocity, dt);
    velocity.y = apply_fall_multiplier(
        tuning.apply_fall_multiplier,
        state.is_grounded(),
        velocity.y,
        tuning.fall_multiplier,
        gravity_y,
    );
    state.velocity = velocity;

    let flipped = should_flip(velocity.x, state.facing, tuning.facing_deadzone);
    if flipped {
        state.facing = state.facing.flipped();
    }

    TickOutcome {
        direction,
        velocity,
        flipped,
    }
}
