//! Movement domain: messages for rendering and audio collaborators.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::strategy::StrategyKind;

/// Event fired when the player swaps between crow and cat
#[derive(Debug)]
pub struct AnimalSwitchedEvent {
    pub entity: Entity,
    pub to: StrategyKind,
}

impl Message for AnimalSwitchedEvent {}
