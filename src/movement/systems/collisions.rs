//! Movement domain: routing physics contacts into terrain flags.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::contact::{
    ContactPhase, TerrainContact, apply_contact, end_contact, normal_into_character,
};
use crate::movement::{CharacterState, MovementTuning, Terrain};

/// Normals of every manifold in `pair`, oriented into `character`.
fn contact_normals(pair: &ContactPair, character: Entity) -> Vec<Vec2> {
    let character_is_first = pair.collider1 == character;
    let normals: Vec<Vec2> = pair
        .manifolds
        .iter()
        .map(|manifold| normal_into_character(manifold.normal, character_is_first))
        .collect();

    if normals.iter().any(|normal| !normal.is_finite()) {
        warn!(
            "Non-finite contact normal between {:?} and {:?}, ignoring it",
            pair.collider1, pair.collider2
        );
    }

    normals
}

fn classify_pair(pair: &ContactPair, character: Entity, tuning: &MovementTuning) -> TerrainContact {
    TerrainContact::classify(
        &contact_normals(pair, character),
        tuning.contact_normal_threshold,
    )
}

pub(crate) fn begin_terrain_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    collisions: Collisions,
    terrain_query: Query<(), With<Terrain>>,
    mut characters: Query<(&mut CharacterState, &MovementTuning)>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (character, terrain) in pairs {
            if !terrain_query.contains(terrain) {
                continue;
            }
            let Ok((mut state, tuning)) = characters.get_mut(character) else {
                continue;
            };
            // The pair may already be gone if the bodies separated within the step
            let Some(pair) = collisions.get(character, terrain) else {
                continue;
            };

            let contact = classify_pair(pair, character, tuning);
            apply_contact(&mut state, tuning, terrain, contact, ContactPhase::Begin);
        }
    }
}

pub(crate) fn end_terrain_contacts(
    mut collision_events: MessageReader<CollisionEnd>,
    mut characters: Query<&mut CharacterState>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (character, other) in pairs {
            let Ok(mut state) = characters.get_mut(character) else {
                continue;
            };
            end_contact(&mut state, other);
        }
    }
}

/// Re-classify every touching terrain pair once per tick.
pub(crate) fn continue_terrain_contacts(
    collisions: Collisions,
    terrain_query: Query<(), With<Terrain>>,
    mut characters: Query<(Entity, &mut CharacterState, &MovementTuning)>,
) {
    for (character, mut state, tuning) in &mut characters {
        for pair in collisions.collisions_with(character) {
            if !pair.is_touching() {
                continue;
            }

            let terrain = if pair.collider1 == character {
                pair.collider2
            } else {
                pair.collider1
            };
            if !terrain_query.contains(terrain) {
                continue;
            }

            let contact = classify_pair(pair, character, tuning);
            apply_contact(&mut state, tuning, terrain, contact, ContactPhase::Continue);
        }
    }
}
