//! Movement domain: terrain contact classification.
//!
//! Contact normals point from the terrain into the character. A normal with
//! +Y is ground, +X means the wall is on the character's left and -X means
//! the wall is on its right.

use bevy::prelude::*;

use crate::movement::components::CharacterState;
use crate::movement::resources::MovementTuning;

/// Semantic relation of one collision event against terrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainContact {
    pub ground: bool,
    pub left_wall: bool,
    pub right_wall: bool,
}

impl TerrainContact {
    /// OR-reduce every contact normal of an event into the three categories.
    /// Non-finite normals never match any category.
    pub fn classify(normals: &[Vec2], threshold: f32) -> Self {
        normals
            .iter()
            .filter(|normal| normal.is_finite())
            .fold(Self::default(), |acc, normal| Self {
                ground: acc.ground || normal.y >= threshold,
                left_wall: acc.left_wall || normal.x >= threshold,
                right_wall: acc.right_wall || normal.x <= -threshold,
            })
    }

    pub fn is_empty(&self) -> bool {
        !(self.ground || self.left_wall || self.right_wall)
    }
}

/// Categories that gained a new attribution during one contact update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactEnter {
    pub ground: bool,
    pub left_wall: bool,
    pub right_wall: bool,
}

/// Which phase of the engine's collision callbacks produced a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Begin,
    Continue,
}

/// Apply a classified contact with `terrain` to the character state.
///
/// Categories newly satisfied by `terrain` are attributed to it and run their
/// enter hooks. During `Continue`, categories `terrain` no longer satisfies
/// are detached from it, leaving other objects' attributions untouched.
pub fn apply_contact(
    state: &mut CharacterState,
    tuning: &MovementTuning,
    terrain: Entity,
    contact: TerrainContact,
    phase: ContactPhase,
) -> ContactEnter {
    let mut enter = ContactEnter::default();

    if contact.ground {
        enter.ground = state.ground.attach(terrain);
    }
    if contact.left_wall {
        enter.left_wall = state.left_wall.attach(terrain);
    }
    if contact.right_wall {
        enter.right_wall = state.right_wall.attach(terrain);
    }

    if phase == ContactPhase::Continue {
        if !contact.ground {
            state.ground.detach(terrain);
        }
        if !contact.left_wall {
            state.left_wall.detach(terrain);
        }
        if !contact.right_wall {
            state.right_wall.detach(terrain);
        }
    }

    if enter.ground {
        on_ground_enter(state);
    }
    if enter.left_wall || enter.right_wall {
        on_wall_enter(state, tuning);
    }

    enter
}

/// Contact with `terrain` ended. Only categories attributed to it are cleared.
/// Returns true if any category was attributed to `terrain`.
pub fn end_contact(state: &mut CharacterState, terrain: Entity) -> bool {
    let ground = state.ground.detach(terrain);
    let left = state.left_wall.detach(terrain);
    let right = state.right_wall.detach(terrain);

    if ground && !state.is_grounded() {
        debug!("Left ground");
    }
    if (left || right) && !state.is_touching_wall() {
        debug!("Left wall");
    }

    ground || left || right
}

fn on_ground_enter(state: &mut CharacterState) {
    state.double_jump_available = true;
    debug!(
        "Grounded: contacts={}, double jump refunded",
        state.ground.len()
    );
}

fn on_wall_enter(state: &mut CharacterState, tuning: &MovementTuning) {
    if tuning.wall_touch_refunds_double_jump && !state.is_grounded() {
        state.double_jump_available = true;
    }
    debug!(
        "Touching wall: left={}, right={}",
        state.is_touching_wall_left(),
        state.is_touching_wall_right()
    );
}

/// Orient a manifold normal so it points into `character`.
///
/// Engine normals point from the first collider of a pair to the second.
pub fn normal_into_character(normal: Vec2, character_is_first: bool) -> Vec2 {
    if character_is_first { -normal } else { normal }
}
