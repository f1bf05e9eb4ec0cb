//! Movement domain: static terrain of the arena.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::GameplayDefaults;
use crate::movement::{GameLayer, Terrain};

pub(crate) fn spawn_arena(mut commands: Commands, gameplay: Res<GameplayDefaults>) {
    let terrain_color = Color::srgb(0.35, 0.35, 0.45);
    let terrain_layers =
        CollisionLayers::new(GameLayer::Terrain, [GameLayer::Player, GameLayer::Enemy]);

    for block in &gameplay.arena {
        let size = Vec2::new(block.size.0, block.size.1);
        commands.spawn((
            Terrain,
            Sprite {
                color: terrain_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(block.position.0, block.position.1, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            terrain_layers,
        ));
    }

    info!("Arena spawned with {} terrain blocks", gameplay.arena.len());
}
