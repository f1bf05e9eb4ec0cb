//! Movement domain: sprite updates driven by character state.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::strategy::StrategyKind;
use crate::movement::{AnimalSwitchedEvent, CharacterState, Facing};

/// Mirror sprites to match the facing decided by the controller.
pub(crate) fn sync_facing_sprites(
    mut query: Query<(&CharacterState, &mut Sprite), Changed<CharacterState>>,
) {
    for (state, mut sprite) in &mut query {
        let flip = state.facing == Facing::Left;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}

pub(crate) fn recolor_switched_animals(
    mut switched_events: MessageReader<AnimalSwitchedEvent>,
    mut sprites: Query<&mut Sprite>,
) {
    for event in switched_events.read() {
        if let Ok(mut sprite) = sprites.get_mut(event.entity) {
            sprite.color = strategy_color(event.to);
        }
    }
}

/// Flat colour for a character driven by `kind`
pub fn strategy_color(kind: StrategyKind) -> Color {
    match kind {
        StrategyKind::Crow => Color::srgb(0.2, 0.2, 0.3),
        StrategyKind::Cat => Color::srgb(0.95, 0.6, 0.25),
        StrategyKind::BackAndForth => Color::srgb(0.4, 0.75, 0.4),
        StrategyKind::Markov => Color::srgb(0.75, 0.25, 0.3),
        StrategyKind::Stationary => Color::srgb(0.6, 0.6, 0.65),
    }
}
