//! Debug domain: developer diagnostics (feature `dev-tools`).
//!
//! - F3 toggles an overlay with the player's position, velocity and flags
//! - Player snapshot changes are logged at debug level

mod state;
mod systems;
mod ui;

pub use state::DebugState;

use bevy::prelude::*;

use crate::core::GameState;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                systems::toggle_debug_info,
                systems::log_player_snapshot,
                systems::update_debug_info_overlay,
            )
                .chain()
                .run_if(in_state(GameState::Run)),
        );
    }
}
