//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse RON text containing a single value of `T`.
pub fn parse_ron<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read_file(path)?;
    let data: DataFile<T> = parse_ron(&path.display().to_string(), &contents)?;
    Ok(data.items)
}

/// Load a single RON struct (not wrapped in DataFile).
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read_file(path)?;
    parse_ron(&path.display().to_string(), &contents)
}

/// Load all content from assets/data/*.ron.
///
/// Every file is attempted; a file that fails leaves its part of the result
/// at the built-in defaults and its error is returned alongside.
pub fn load_all_content(
    base_path: &Path,
) -> (ContentRegistry, GameplayDefaults, Vec<ContentLoadError>) {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    match load_data_file::<CharacterDef>(&base_path.join("characters.ron")) {
        Ok(items) => {
            for item in items {
                registry.characters.insert(item.id.clone(), item);
            }
        }
        Err(e) => {
            errors.push(e);
            registry = ContentRegistry::with_builtin_characters();
        }
    }

    let gameplay = match load_single_file::<GameplayDefaults>(&base_path.join("gameplay.ron")) {
        Ok(defaults) => defaults,
        Err(e) => {
            errors.push(e);
            GameplayDefaults::default()
        }
    };

    (registry, gameplay, errors)
}
