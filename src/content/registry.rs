//! ContentRegistry resource providing HashMap lookups for all loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded game content.
#[derive(Resource, Debug, Default)]
pub struct ContentRegistry {
    pub characters: HashMap<String, CharacterDef>,
}

impl ContentRegistry {
    /// Registry holding only the built-in player, used when no data loads.
    pub fn with_builtin_characters() -> Self {
        let mut registry = Self::default();
        let player = builtin_player();
        registry.characters.insert(player.id.clone(), player);
        registry
    }

    pub fn character(&self, id: &str) -> Option<&CharacterDef> {
        self.characters.get(id)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let players = self
            .characters
            .values()
            .filter(|c| c.role == RoleDef::Player)
            .count();
        format!(
            "ContentRegistry loaded: {} characters ({} player, {} enemy)",
            self.characters.len(),
            players,
            self.characters.len() - players
        )
    }
}

/// The player used when characters.ron is missing or has no player.
pub fn builtin_player() -> CharacterDef {
    CharacterDef {
        id: "player".to_string(),
        name: "Clemm".to_string(),
        role: RoleDef::Player,
        strategy: StrategyDef::Crow,
        max_health: 3.0,
        contact_damage: 0.0,
        size: (24.0, 32.0),
        movement: MovementDef::default(),
        markov: None,
    }
}
