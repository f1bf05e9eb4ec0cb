//! Validation for cross-references and tuning values in content definitions.

use super::data::*;
use super::registry::ContentRegistry;

/// Tolerance for a Markov row summing to one.
const ROW_SUM_TOLERANCE: f32 = 1e-3;

/// A validation problem with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for recording a failed check
macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

/// Validate all content. Returns an empty list if everything is consistent.
pub fn validate_content(
    registry: &ContentRegistry,
    gameplay: &GameplayDefaults,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, character) in &registry.characters {
        validate_movement(&mut errors, id, &character.movement);

        check!(
            errors,
            character.role != RoleDef::Player || character.max_health > 0.0,
            "Character",
            id,
            "max_health",
            "must be positive, got {}",
            character.max_health
        );

        let player_strategy = matches!(character.strategy, StrategyDef::Crow | StrategyDef::Cat);
        check!(
            errors,
            player_strategy == (character.role == RoleDef::Player)
                || character.strategy == StrategyDef::Stationary,
            "Character",
            id,
            "strategy",
            "{:?} cannot drive a {:?} character",
            character.strategy,
            character.role
        );

        match (&character.markov, character.strategy) {
            (Some(markov), _) => validate_markov(&mut errors, id, markov),
            (None, StrategyDef::Markov) => errors.push(ValidationError {
                source_type: "Character",
                source_id: id.clone(),
                field: "markov",
                message: "Markov strategy requires a markov definition".to_string(),
            }),
            (None, _) => {}
        }
    }

    check!(
        errors,
        gameplay.tick_rate_hz > 0.0,
        "Gameplay",
        "gameplay",
        "tick_rate_hz",
        "must be positive, got {}",
        gameplay.tick_rate_hz
    );

    match registry.character(&gameplay.player_id) {
        Some(player) => check!(
            errors,
            player.role == RoleDef::Player,
            "Gameplay",
            "gameplay",
            "player_id",
            "'{}' is not a player character",
            gameplay.player_id
        ),
        None => errors.push(ValidationError {
            source_type: "Gameplay",
            source_id: "gameplay".to_string(),
            field: "player_id",
            message: format!("references missing Character '{}'", gameplay.player_id),
        }),
    }

    for spawn in &gameplay.arena_spawns {
        check!(
            errors,
            registry.characters.contains_key(&spawn.def_id),
            "Gameplay",
            "gameplay",
            "arena_spawns",
            "references missing Character '{}'",
            spawn.def_id
        );
    }

    for (index, block) in gameplay.arena.iter().enumerate() {
        check!(
            errors,
            block.size.0 > 0.0 && block.size.1 > 0.0,
            "Gameplay",
            "gameplay",
            "arena",
            "block {} has non-positive size {:?}",
            index,
            block.size
        );
    }

    errors
}

fn validate_movement(errors: &mut Vec<ValidationError>, id: &str, movement: &MovementDef) {
    for (field, value) in [
        ("wall_jump_input_influence", movement.wall_jump_input_influence),
        ("knockback_input_influence", movement.knockback_input_influence),
    ] {
        check!(
            errors,
            (0.0..=1.0).contains(&value),
            "Character",
            id,
            field,
            "must be within [0, 1], got {}",
            value
        );
    }

    check!(
        errors,
        movement.fall_multiplier >= 1.0,
        "Character",
        id,
        "fall_multiplier",
        "must be at least 1, got {}",
        movement.fall_multiplier
    );

    check!(
        errors,
        movement.contact_normal_threshold > 0.0 && movement.contact_normal_threshold <= 1.0,
        "Character",
        id,
        "contact_normal_threshold",
        "must be within (0, 1], got {}",
        movement.contact_normal_threshold
    );
}

fn validate_markov(errors: &mut Vec<ValidationError>, id: &str, markov: &MarkovDef) {
    let states = markov.transitions.len();
    check!(
        errors,
        states == 4,
        "Character",
        id,
        "markov.transitions",
        "expected 4 rows (MoveToPlayer, Jump, Bite, Spikes), got {}",
        states
    );

    for (row_index, row) in markov.transitions.iter().enumerate() {
        check!(
            errors,
            row.len() == states,
            "Character",
            id,
            "markov.transitions",
            "row {} has {} entries, expected {}",
            row_index,
            row.len(),
            states
        );

        check!(
            errors,
            row.iter().all(|p| *p >= 0.0),
            "Character",
            id,
            "markov.transitions",
            "row {} has a negative probability",
            row_index
        );

        let sum: f32 = row.iter().sum();
        check!(
            errors,
            (sum - 1.0).abs() <= ROW_SUM_TOLERANCE,
            "Character",
            id,
            "markov.transitions",
            "row {} sums to {}, expected 1",
            row_index,
            sum
        );
    }

    check!(
        errors,
        markov.initial_move < states,
        "Character",
        id,
        "markov.initial_move",
        "{} is out of range for {} states",
        markov.initial_move,
        states
    );

    let durations = markov.durations;
    check!(
        errors,
        durations.move_to_player > 0
            && durations.jump > 0
            && durations.bite > 0
            && durations.spikes > 0,
        "Character",
        id,
        "markov.durations",
        "every move needs at least one tick"
    );
}
