//! Movement domain: data-driven spawning of characters.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::{Health, MarkovChain, MarkovChainError};
use crate::content::{
    CharacterDef, ContentRegistry, GameplayDefaults, RoleDef, StrategyDef, builtin_player,
};
use crate::core::RunConfig;
use crate::movement::strategy::{
    BackAndForthStrategy, CatStrategy, CrowStrategy, MarkovStrategy, MoveDurations,
    StationaryStrategy,
};
use crate::movement::systems::visuals::strategy_color;
use crate::movement::{
    CharacterIntent, CharacterState, ControllerRole, GameLayer, MovementTuning, Player, Strategy,
};

/// Build the strategy a definition asks for. `seed` feeds the decision RNG
/// of Markov-driven characters.
pub fn build_strategy(def: &CharacterDef, seed: u64) -> Result<Strategy, MarkovChainError> {
    let strategy = match def.strategy {
        StrategyDef::Crow => Strategy::Crow(CrowStrategy),
        StrategyDef::Cat => Strategy::Cat(CatStrategy),
        StrategyDef::BackAndForth => Strategy::BackAndForth(BackAndForthStrategy),
        StrategyDef::Stationary => Strategy::Stationary(StationaryStrategy),
        StrategyDef::Markov => {
            // A missing definition is treated as an empty matrix
            let (transitions, initial, durations) = match &def.markov {
                Some(markov) => (
                    markov.transitions.clone(),
                    markov.initial_move,
                    MoveDurations::from_def(&markov.durations),
                ),
                None => (Vec::new(), 0, MoveDurations::from_def(&Default::default())),
            };
            let chain = MarkovChain::new(transitions, initial)?;
            Strategy::Markov(Box::new(MarkovStrategy::new(
                chain,
                durations,
                ChaCha8Rng::seed_from_u64(seed),
            )))
        }
    };
    Ok(strategy)
}

/// Movement and physics components shared by every character.
pub fn character_bundle(
    def: &CharacterDef,
    role: ControllerRole,
    strategy: Strategy,
    position: Vec2,
    layers: CollisionLayers,
) -> impl Bundle {
    let size = Vec2::new(def.size.0, def.size.1);
    let color = strategy_color(strategy.kind());

    (
        // Identity & Movement
        (
            role,
            CharacterState::default(),
            CharacterIntent::default(),
            MovementTuning::from_def(&def.movement),
            strategy,
        ),
        // Rendering
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.0),
            CollisionEventsEnabled,
            layers,
        ),
    )
}

/// Spawn the player character when the run starts.
pub(crate) fn spawn_player(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    gameplay: Res<GameplayDefaults>,
    run_config: Res<RunConfig>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let def = match registry.character(&gameplay.player_id) {
        Some(def) if def.role == RoleDef::Player => def.clone(),
        _ => {
            warn!(
                "Player '{}' not found in registry, using built-in player",
                gameplay.player_id
            );
            builtin_player()
        }
    };

    let strategy = build_strategy(&def, run_config.seed).unwrap_or_else(|e| {
        warn!("Player '{}' strategy unusable ({}), using crow", def.id, e);
        Strategy::Crow(CrowStrategy)
    });

    let position = Vec2::new(gameplay.player_spawn.0, gameplay.player_spawn.1);
    let layers = CollisionLayers::new(
        GameLayer::Player,
        [GameLayer::Terrain, GameLayer::Enemy, GameLayer::EnemyHitbox],
    );

    info!(
        "Spawning player '{}' as {:?} at ({}, {}), health={}",
        def.name,
        strategy.kind(),
        position.x,
        position.y,
        def.max_health
    );

    commands.spawn((
        Player,
        Health::new(def.max_health),
        character_bundle(&def, ControllerRole::Player, strategy, position, layers),
    ));
}
