//! Core domain: run setup and death handling.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::DeathEvent;
use crate::content::GameplayDefaults;
use crate::core::resources::RunConfig;
use crate::core::state::GameState;
use crate::movement::Player;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Fix the run seed. A seed from gameplay.ron makes enemy decisions
/// reproducible; otherwise the random default is kept.
pub(crate) fn initialize_run(gameplay: Res<GameplayDefaults>, mut run_config: ResMut<RunConfig>) {
    if let Some(seed) = gameplay.seed {
        run_config.seed = seed;
    }
    info!("Starting run with seed: {}", run_config.seed);
}

pub(crate) fn transition_to_run(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}

/// End the run when the player dies
pub(crate) fn handle_player_death(
    mut events: MessageReader<DeathEvent>,
    players: Query<(), With<Player>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        if players.contains(event.entity) {
            info!("Player {:?} died, game over", event.entity);
            game_state.set(GameState::GameOver);
        }
    }
}

/// Stop the player's body where it died.
pub(crate) fn freeze_player(mut commands: Commands, players: Query<Entity, With<Player>>) {
    for entity in &players {
        commands.entity(entity).insert(RigidBody::Static);
    }
}
