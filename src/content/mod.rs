//! Content domain: RON character data, gameplay defaults and validation.

mod data;
mod loader;
mod registry;
mod validation;

pub use data::{
    CharacterDef, DataFile, GameplayDefaults, MarkovDef, MoveDurationsDef, MovementDef, RoleDef,
    SpawnDef, StrategyDef, TerrainDef,
};
pub use loader::{ContentLoadError, load_all_content, parse_ron};
pub use registry::{ContentRegistry, builtin_player};
pub use validation::{ValidationError, validate_content};

use avian2d::prelude::*;
use bevy::prelude::*;
use std::path::Path;

const CONTENT_PATH: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

/// Load content at startup and apply the engine-wide settings it carries.
/// Missing or broken files fall back to built-in defaults.
fn load_content(mut commands: Commands) {
    let (registry, gameplay, errors) = load_all_content(Path::new(CONTENT_PATH));

    for error in &errors {
        error!("{}", error);
    }

    for problem in validate_content(&registry, &gameplay) {
        warn!("Content validation: {}", problem);
    }

    info!("{}", registry.summary());
    info!(
        "Fixed tick {} Hz, gravity {}",
        gameplay.tick_rate_hz, gameplay.gravity
    );

    if gameplay.tick_rate_hz > 0.0 {
        commands.insert_resource(Time::<Fixed>::from_hz(gameplay.tick_rate_hz));
    }
    commands.insert_resource(Gravity(Vec2::new(0.0, gameplay.gravity)));
    commands.insert_resource(registry);
    commands.insert_resource(gameplay);
}
