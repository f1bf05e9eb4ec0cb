//! Movement domain: system modules for the fixed-tick character controller.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod tick;
pub(crate) mod variant;
pub(crate) mod visuals;

pub(crate) use collisions::{
    begin_terrain_contacts, continue_terrain_contacts, end_terrain_contacts,
};
pub(crate) use input::read_player_input;
pub(crate) use tick::run_character_controllers;
pub(crate) use variant::resolve_animal_switch;
pub(crate) use visuals::{recolor_switched_animals, sync_facing_sprites};
