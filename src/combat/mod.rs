//! Combat domain: health, the enemy-contact hook, Markov-driven enemies and
//! their attack hitboxes.

pub(crate) mod ai;
mod components;
mod events;
mod spawn;
mod systems;

pub use ai::{MarkovChain, MarkovChainError};
pub use components::{
    DamageFlash, Enemy, EnemyAttacks, EnemyContact, Health, Hitbox, HitboxLifetime,
    attack_shapes, hit_source_label,
};
pub use events::{DamageEvent, DeathEvent};
pub use spawn::enemy_seed;
pub use systems::{HitOutcome, knockback_direction, receive_enemy_hit};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::MovementSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_systems(OnEnter(GameState::Run), spawn::spawn_arena_enemies)
            .add_systems(
                FixedUpdate,
                systems::handle_enemy_contacts.in_set(MovementSet::Contacts),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::tick_hitbox_lifetimes,
                    systems::spawn_attack_hitboxes,
                    systems::tick_damage_flashes,
                    systems::flash_damaged_characters,
                )
                    .chain()
                    .in_set(MovementSet::PostTick),
            );
    }
}
