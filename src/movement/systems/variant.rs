//! Movement domain: animal switching for the player.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{AnimalSwitchedEvent, CharacterIntent, Player, Strategy};

/// Resolve a latched switch request before the movement tick, so the new
/// animal decides this tick's movement.
pub(crate) fn resolve_animal_switch(
    mut query: Query<(Entity, &mut CharacterIntent, &mut Strategy), With<Player>>,
    mut switched_events: MessageWriter<AnimalSwitchedEvent>,
) {
    for (entity, mut intent, mut strategy) in &mut query {
        if !intent.take_switch() {
            continue;
        }

        let Some(next) = strategy.switched_animal() else {
            debug!(
                "{:?} cannot switch animal from {:?}",
                entity,
                strategy.kind()
            );
            continue;
        };

        let from = strategy.kind();
        *strategy = next;
        let to = strategy.kind();

        info!("Switched animal: {:?} -> {:?}", from, to);
        switched_events.write(AnimalSwitchedEvent { entity, to });
    }
}
