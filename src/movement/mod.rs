//! Movement domain: fixed-tick character controller, terrain contacts and
//! movement strategies.

mod arena;
mod bootstrap;
mod components;
pub mod contact;
pub mod controller;
mod events;
mod resources;
pub mod strategy;
pub(crate) mod systems;
#[cfg(test)]
mod tests;

pub use bootstrap::{build_strategy, character_bundle};
pub use components::{
    CharacterIntent, CharacterSnapshot, CharacterState, ContactSet, ControllerRole, Facing,
    GameLayer, Hitstun, PendingKnockback, Player, Terrain,
};
pub use events::AnimalSwitchedEvent;
pub use resources::{InputBindings, MovementTuning};
pub use strategy::{
    EnemyAttack, MarkovMove, MarkovStrategy, MovementContext, MovementStrategy, Strategy,
    StrategyKind,
};

use bevy::prelude::*;

use crate::core::GameState;

/// Ordering of the fixed tick: contacts are routed first, pending switches
/// resolve before movement, and collaborators react after velocity is
/// committed.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSet {
    Contacts,
    PreTick,
    Tick,
    PostTick,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>()
            .add_message::<AnimalSwitchedEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    MovementSet::Contacts,
                    MovementSet::PreTick,
                    MovementSet::Tick,
                    MovementSet::PostTick,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                OnEnter(GameState::Run),
                (arena::spawn_arena, bootstrap::spawn_player),
            )
            .add_systems(
                Update,
                (
                    systems::read_player_input,
                    systems::recolor_switched_animals,
                )
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::begin_terrain_contacts,
                    systems::end_terrain_contacts,
                    systems::continue_terrain_contacts,
                )
                    .chain()
                    .in_set(MovementSet::Contacts),
            )
            .add_systems(
                FixedUpdate,
                systems::resolve_animal_switch.in_set(MovementSet::PreTick),
            )
            .add_systems(
                FixedUpdate,
                systems::run_character_controllers.in_set(MovementSet::Tick),
            )
            .add_systems(
                FixedUpdate,
                systems::sync_facing_sprites.in_set(MovementSet::PostTick),
            );
    }
}
