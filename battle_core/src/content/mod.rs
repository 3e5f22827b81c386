//! Content loading - data-driven ability/status/environment definitions
//!
//! Content is authored as TOML and loaded once per battle session into an
//! explicit [`ContentSet`] that is injected into the engine. Load failures
//! are fatal to starting a battle; runtime lookups of missing ids degrade
//! to neutral defaults with a warning.

mod defaults;
mod registry;

pub use defaults::default_content;
pub use registry::{ContentSet, Registry};

use crate::ability::Ability;
use crate::environment::EnvironmentDescriptor;
use crate::status::StatusDefinition;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Content loading error
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read content file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Content validation error: {0}")]
    ValidationError(String),
}

/// Raw deserialized content file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPack {
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub statuses: Vec<StatusDefinition>,
    #[serde(default)]
    pub environments: Vec<EnvironmentDescriptor>,
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let content = fs::read_to_string(path)?;
    let parsed: T = toml::from_str(&content)?;
    Ok(parsed)
}

/// Parse a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ContentError> {
    let parsed: T = toml::from_str(content)?;
    Ok(parsed)
}

/// Load a full content set from a TOML file
pub fn load_content(path: &Path) -> Result<ContentSet, ContentError> {
    let pack: ContentPack = load_toml(path)?;
    ContentSet::from_pack(pack)
}

/// Parse a full content set from a TOML string
pub fn parse_content(content: &str) -> Result<ContentSet, ContentError> {
    let pack: ContentPack = parse_toml(content)?;
    ContentSet::from_pack(pack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_sections() {
        let toml = r#"
[[abilities]]
id = "jab"
name = "Jab"
category = "physical"
damage_min = 3
damage_max = 6

[[statuses]]
id = "poison"
name = "Poisoned"
tick_damage = 2

[[environments]]
id = "swamp"
name = "Fetid Swamp"
"#;
        let set = parse_content(toml).unwrap();
        assert!(set.abilities.get("jab").is_some());
        assert!(set.statuses.get("poison").is_some());
        assert!(set.environments.get("swamp").is_some());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
[[abilities]]
id = "jab"
name = "Jab"
category = "physical"

[[abilities]]
id = "jab"
name = "Jab Again"
category = "physical"
"#;
        assert!(matches!(
            parse_content(toml),
            Err(ContentError::ValidationError(_))
        ));
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        assert!(matches!(
            parse_content("abilities = 3"),
            Err(ContentError::ParseError(_))
        ));
    }
}
