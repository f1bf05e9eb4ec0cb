//! Combat domain: data-driven enemy spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{Enemy, EnemyAttacks, EnemyContact};
use crate::content::{ContentRegistry, GameplayDefaults, RoleDef};
use crate::core::RunConfig;
use crate::movement::{ControllerRole, GameLayer, build_strategy, character_bundle};

/// Seed for the decision RNG of the enemy at `index` in the spawn list.
pub fn enemy_seed(run_seed: u64, index: usize) -> u64 {
    run_seed.wrapping_add(index as u64 + 1)
}

/// Spawn every enemy listed for the arena.
pub(crate) fn spawn_arena_enemies(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    gameplay: Res<GameplayDefaults>,
    run_config: Res<RunConfig>,
) {
    let layers = CollisionLayers::new(GameLayer::Enemy, [GameLayer::Terrain, GameLayer::Player]);

    for (index, spawn) in gameplay.arena_spawns.iter().enumerate() {
        let Some(def) = registry.character(&spawn.def_id) else {
            warn!(
                "Unknown enemy definition '{}', skipping spawn",
                spawn.def_id
            );
            continue;
        };
        if def.role != RoleDef::Enemy {
            warn!("'{}' is not an enemy, skipping spawn", def.id);
            continue;
        }

        let strategy = match build_strategy(def, enemy_seed(run_config.seed, index)) {
            Ok(strategy) => strategy,
            Err(e) => {
                warn!("Enemy '{}' has an unusable strategy: {}", def.id, e);
                continue;
            }
        };

        let kind = strategy.kind();
        let position = Vec2::new(spawn.position.0, spawn.position.1);
        let mut enemy = commands.spawn((
            Enemy,
            EnemyContact {
                damage: def.contact_damage,
            },
            character_bundle(def, ControllerRole::Enemy, strategy, position, layers),
        ));

        if let Some(markov) = &def.markov {
            enemy.insert(EnemyAttacks {
                bite_ticks: markov.bite_hitbox_ticks,
                spike_ticks: markov.spike_hitbox_ticks,
                body_size: Vec2::new(def.size.0, def.size.1),
            });
        }

        info!(
            "Spawned enemy '{}' ({:?}) at ({}, {})",
            def.name, kind, position.x, position.y
        );
    }
}
