//! Debug domain: overlay toggling and state diagnostics.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Health;
use crate::core::RunConfig;
use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, spawn_debug_info_overlay};
use crate::movement::{CharacterState, Player, Strategy};

/// Toggle the info overlay with F3
pub(crate) fn toggle_debug_info(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    debug_state.show_info = !debug_state.show_info;
    if debug_state.show_info {
        spawn_debug_info_overlay(&mut commands);
    } else {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
    }
}

/// Log the player's snapshot whenever one of its flags changes.
pub(crate) fn log_player_snapshot(
    mut debug_state: ResMut<DebugState>,
    player_query: Query<(&CharacterState, &Strategy), With<Player>>,
) {
    let Some((state, strategy)) = player_query.iter().next() else {
        return;
    };

    let snapshot = state.snapshot(strategy.kind());
    if debug_state.observe(snapshot) {
        debug!("Player snapshot: {:?}", snapshot);
    }
}

pub(crate) fn update_debug_info_overlay(
    debug_state: Res<DebugState>,
    run_config: Res<RunConfig>,
    player_query: Query<(&Transform, &LinearVelocity, &Health), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        return;
    }

    let (Some((transform, velocity, health)), Some(snapshot), Ok(mut text)) = (
        player_query.iter().next(),
        debug_state.last_snapshot,
        overlay_query.single_mut(),
    ) else {
        return;
    };

    let pos = transform.translation;
    **text = format!(
        "Pos: ({:.0}, {:.0})\nVel: ({:.0}, {:.0})\nHP: {:.0}/{:.0}\nAnimal: {:?}\nFacing: {:?}\nGrounded: {}\nWall L/R: {}/{}\nDouble jump: {}\nHitstun: {}\nSeed: {}",
        pos.x,
        pos.y,
        velocity.x,
        velocity.y,
        health.current,
        health.max,
        snapshot.variant,
        snapshot.facing,
        snapshot.grounded,
        snapshot.touching_wall_left,
        snapshot.touching_wall_right,
        snapshot.double_jump_available,
        snapshot.in_hitstun,
        run_config.seed
    );
}
