//! Core domain: game states, run seed, camera and death handling.

mod resources;
mod state;
mod systems;

pub use resources::RunConfig;
pub use state::GameState;

use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .add_systems(
                Startup,
                (
                    systems::setup_camera,
                    (systems::initialize_run, systems::transition_to_run).chain(),
                ),
            )
            .add_systems(
                Update,
                systems::handle_player_death.run_if(in_state(GameState::Run)),
            )
            .add_systems(OnEnter(GameState::GameOver), systems::freeze_player);
    }
}
