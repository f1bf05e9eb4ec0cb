//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Characters (characters.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum RoleDef {
    Player,
    #[default]
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum StrategyDef {
    Crow,
    Cat,
    BackAndForth,
    Markov,
    #[default]
    Stationary,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CharacterDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: RoleDef,
    #[serde(default)]
    pub strategy: StrategyDef,
    /// Hit points (players only; enemies cannot be damaged)
    #[serde(default = "default_max_health")]
    pub max_health: f32,
    /// Damage dealt to the player on contact (enemies only)
    #[serde(default = "default_contact_damage")]
    pub contact_damage: f32,
    /// Collider size in world units
    #[serde(default = "default_size")]
    pub size: (f32, f32),
    #[serde(default)]
    pub movement: MovementDef,
    #[serde(default)]
    pub markov: Option<MarkovDef>,
}

fn default_max_health() -> f32 {
    3.0
}

fn default_contact_damage() -> f32 {
    1.0
}

fn default_size() -> (f32, f32) {
    (24.0, 32.0)
}

/// Movement tuning. Forces are world units per second; durations are ticks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementDef {
    /// Horizontal speed before scaling by the tick duration
    pub movement_speed: f32,
    pub jump_force: f32,
    pub apply_fall_multiplier: bool,
    pub fall_multiplier: f32,
    pub wall_jump_upwards_force: f32,
    pub wall_jump_sideways_force: f32,
    pub wall_jump_recovery_ticks: u32,
    pub wall_jump_input_influence: f32,
    pub knockback_upwards_force: f32,
    pub knockback_sideways_force: f32,
    pub knockback_hitstun_ticks: u32,
    pub knockback_input_influence: f32,
    pub facing_deadzone: f32,
    pub wall_touch_refunds_double_jump: bool,
    pub contact_normal_threshold: f32,
}

impl Default for MovementDef {
    fn default() -> Self {
        Self {
            movement_speed: 14000.0,
            jump_force: 520.0,
            apply_fall_multiplier: false,
            fall_multiplier: 1.03,
            wall_jump_upwards_force: 480.0,
            wall_jump_sideways_force: 16000.0,
            wall_jump_recovery_ticks: 12,
            wall_jump_input_influence: 0.3,
            knockback_upwards_force: 300.0,
            knockback_sideways_force: 12000.0,
            knockback_hitstun_ticks: 15,
            knockback_input_influence: 0.2,
            facing_deadzone: 0.01,
            wall_touch_refunds_double_jump: false,
            contact_normal_threshold: 0.99,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkovDef {
    /// Row-stochastic matrix over MoveToPlayer, Jump, Bite, Spikes
    pub transitions: Vec<Vec<f32>>,
    #[serde(default)]
    pub initial_move: usize,
    #[serde(default)]
    pub durations: MoveDurationsDef,
    #[serde(default = "default_bite_ticks")]
    pub bite_hitbox_ticks: u32,
    #[serde(default = "default_spike_ticks")]
    pub spike_hitbox_ticks: u32,
}

fn default_bite_ticks() -> u32 {
    10
}

fn default_spike_ticks() -> u32 {
    20
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct MoveDurationsDef {
    pub move_to_player: u32,
    pub jump: u32,
    pub bite: u32,
    pub spikes: u32,
}

impl Default for MoveDurationsDef {
    fn default() -> Self {
        Self {
            move_to_player: 90,
            jump: 40,
            bite: 30,
            spikes: 45,
        }
    }
}

// ============================================================================
// Gameplay defaults (gameplay.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    /// Fixed physics ticks per second
    pub tick_rate_hz: f64,
    /// Vertical gravity in world units per second squared (negative is down)
    pub gravity: f32,
    /// Seed for enemy decision RNGs; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
    pub player_id: String,
    pub player_spawn: (f32, f32),
    #[serde(default)]
    pub arena_spawns: Vec<SpawnDef>,
    /// Static terrain of the arena
    #[serde(default = "default_arena")]
    pub arena: Vec<TerrainDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpawnDef {
    pub def_id: String,
    pub position: (f32, f32),
}

/// One axis-aligned terrain block, centred on `position`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TerrainDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
}

fn default_arena() -> Vec<TerrainDef> {
    let block = |x, y, w, h| TerrainDef {
        position: (x, y),
        size: (w, h),
    };
    vec![
        // Floor and side walls
        block(0.0, -200.0, 800.0, 40.0),
        block(-420.0, 50.0, 40.0, 500.0),
        block(420.0, 50.0, 40.0, 500.0),
        // Platforms
        block(-250.0, -60.0, 150.0, 20.0),
        block(250.0, 40.0, 150.0, 20.0),
        // Pillar for wall jumps
        block(-100.0, -90.0, 30.0, 180.0),
    ]
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        Self {
            schema_version: 1,
            tick_rate_hz: 50.0,
            gravity: -1200.0,
            seed: None,
            player_id: "player".to_string(),
            player_spawn: (0.0, -120.0),
            arena_spawns: Vec::new(),
            arena: default_arena(),
        }
    }
}
