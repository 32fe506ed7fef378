//! Monster species loaded from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::world::DataLoadError;

const ENEMIES_DIR: &str = "assets/data/enemies";

fn default_attack_cooldown() -> u64 {
    400
}

fn default_attack_animation_speed() -> f32 {
    0.15
}

/// Species definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct MonsterDefinition {
    pub name: String,
    pub health: f32,
    /// Experience awarded to the player on death.
    pub exp: u32,
    pub damage: f32,
    /// Particle effect shown on the player when this species hits.
    pub attack_type: String,
    #[serde(default)]
    pub attack_sound: Option<String>,
    pub speed: f32,
    /// Divides knockback speed; higher resists more.
    pub resistance: f32,
    pub attack_radius: f32,
    pub notice_radius: f32,
    /// Pause after an attack before the next one, in ms.
    #[serde(default = "default_attack_cooldown")]
    pub attack_cooldown: u64,
    #[serde(default = "default_attack_animation_speed")]
    pub attack_animation_speed: f32,
}

impl MonsterDefinition {
    /// Rejects values that break movement: resistance divides knockback
    /// speed, so it must be positive, and speed must not be negative.
    pub fn validate(&self, path: &str) -> Result<(), DataLoadError> {
        let invalid = |details: String| DataLoadError::InvalidValue {
            path: path.to_string(),
            details,
        };
        if self.resistance.is_nan() || self.resistance <= 0.0 {
            return Err(invalid(format!(
                "resistance must be positive, got {}",
                self.resistance
            )));
        }
        if self.speed.is_nan() || self.speed < 0.0 {
            return Err(invalid(format!(
                "speed must not be negative, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

/// All known species, shared read-only by every enemy of that species.
#[derive(Resource, Clone, Debug, Default)]
pub struct MonsterRegistry {
    pub definitions: HashMap<String, Arc<MonsterDefinition>>,
}

impl MonsterRegistry {
    /// Get a species definition by name.
    pub fn get(&self, species: &str) -> Option<&Arc<MonsterDefinition>> {
        self.definitions.get(species)
    }

    pub fn insert(&mut self, definition: MonsterDefinition) {
        self.definitions
            .insert(definition.name.clone(), Arc::new(definition));
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Load every `*.ron` file in `dir`; the file stem is the species key.
    pub fn load_dir(dir: &Path) -> Result<Self, DataLoadError> {
        if !dir.exists() {
            return Err(DataLoadError::FileNotFound(dir.display().to_string()));
        }
        let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
            path: dir.display().to_string(),
            details: e.to_string(),
        })?;

        let mut registry = Self::default();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }
            let display = path.display().to_string();
            let contents = fs::read_to_string(&path).map_err(|e| DataLoadError::ReadError {
                path: display.clone(),
                details: e.to_string(),
            })?;
            let mut definition: MonsterDefinition =
                ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
                    path: display.clone(),
                    details: e.to_string(),
                })?;
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                definition.name = stem.to_string();
            }
            definition.validate(&display)?;
            debug!("Loaded monster definition: {}", definition.name);
            registry.insert(definition);
        }
        Ok(registry)
    }
}

/// Load all species from the assets/data/enemies/ directory.
pub fn load_monster_definitions(mut commands: Commands) {
    let registry = match MonsterRegistry::load_dir(Path::new(ENEMIES_DIR)) {
        Ok(registry) => {
            info!("Loaded {} monster definitions", registry.len());
            registry
        }
        Err(e) => {
            error!("Failed to load monster definitions: {}", e);
            MonsterRegistry::default()
        }
    };
    commands.insert_resource(registry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_take_defaults() {
        let definition: MonsterDefinition = ron::from_str(
            r#"(
                name: "squid",
                health: 100.0,
                exp: 100,
                damage: 20.0,
                attack_type: "slash",
                speed: 3.0,
                resistance: 3.0,
                attack_radius: 80.0,
                notice_radius: 360.0,
            )"#,
        )
        .expect("valid definition");
        assert_eq!(definition.attack_cooldown, 400);
        assert_eq!(definition.attack_animation_speed, 0.15);
        assert!(definition.attack_sound.is_none());
    }

    fn squid() -> MonsterDefinition {
        MonsterDefinition {
            name: "squid".into(),
            health: 100.0,
            exp: 100,
            damage: 20.0,
            attack_type: "slash".into(),
            attack_sound: None,
            speed: 3.0,
            resistance: 3.0,
            attack_radius: 80.0,
            notice_radius: 360.0,
            attack_cooldown: 400,
            attack_animation_speed: 0.15,
        }
    }

    #[test]
    fn zero_resistance_is_rejected() {
        let definition = MonsterDefinition {
            resistance: 0.0,
            ..squid()
        };
        assert!(matches!(
            definition.validate("squid.ron"),
            Err(DataLoadError::InvalidValue { .. })
        ));
        assert!(squid().validate("squid.ron").is_ok());
    }

    #[test]
    fn negative_speed_is_rejected() {
        let definition = MonsterDefinition {
            speed: -1.0,
            ..squid()
        };
        assert!(matches!(
            definition.validate("squid.ron"),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_dir_rejects_invalid_species() {
        let dir = std::env::temp_dir().join(format!("tilebound-species-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        fs::write(
            dir.join("ghost.ron"),
            r#"(
                name: "ghost",
                health: 10.0,
                exp: 5,
                damage: 1.0,
                attack_type: "slash",
                speed: 2.0,
                resistance: 0.0,
                attack_radius: 40.0,
                notice_radius: 200.0,
            )"#,
        )
        .expect("write species");

        let result = MonsterRegistry::load_dir(&dir);
        let _ = fs::remove_dir_all(&dir);
        assert!(matches!(result, Err(DataLoadError::InvalidValue { .. })));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let result = MonsterRegistry::load_dir(Path::new("does/not/exist"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }
}
