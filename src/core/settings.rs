//! Gameplay tuning loaded from `assets/data/settings.ron`.
//!
//! Every field has a default, so the file only needs to list what it changes.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

const SETTINGS_PATH: &str = "assets/data/settings.ron";

/// Hitbox insets (total shrink on each axis) per kind of body.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HitboxInsets {
    pub player: (f32, f32),
    pub enemy: (f32, f32),
    pub large_object: (f32, f32),
    pub grass: (f32, f32),
    pub boundary: (f32, f32),
}

impl Default for HitboxInsets {
    fn default() -> Self {
        Self {
            player: (-6.0, -26.0),
            enemy: (0.0, -10.0),
            large_object: (0.0, -40.0),
            grass: (0.0, -10.0),
            boundary: (0.0, 0.0),
        }
    }
}

/// Base stats and timing windows of the player.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub health: f32,
    pub mana: f32,
    pub attack: f32,
    pub magic: f32,
    pub speed: f32,
    pub starting_exp: u32,
    /// Added to the equipped weapon's cooldown, in ms.
    pub base_attack_cooldown: u64,
    pub switch_duration_cooldown: u64,
    pub invulnerability_duration: u64,
    pub animation_speed: f32,
    /// Mana regained per frame, multiplied by the magic stat.
    pub mana_regen_factor: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            health: 100.0,
            mana: 60.0,
            attack: 10.0,
            magic: 4.0,
            speed: 5.0,
            starting_exp: 0,
            base_attack_cooldown: 400,
            switch_duration_cooldown: 200,
            invulnerability_duration: 500,
            animation_speed: 0.15,
            mana_regen_factor: 0.01,
        }
    }
}

/// Timing shared by every enemy species.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub animation_speed: f32,
    pub invincibility_duration: u64,
    /// Knockback speed before dividing by the species' resistance.
    pub knockback_force: f32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            animation_speed: 0.15,
            invincibility_duration: 300,
            knockback_force: 9.0,
        }
    }
}

/// Global gameplay settings.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub tile_size: f32,
    pub hitbox_insets: HitboxInsets,
    pub player: PlayerSettings,
    pub enemy: EnemySettings,
    pub particle_animation_speed: f32,
    /// Side length of a particle sprite.
    pub particle_size: f32,
    /// Vertical distance above a destroyed tile's centre where leaves spawn.
    pub leaf_offset: f32,
    pub grass_variants: usize,
    pub leaf_variants: usize,
    /// Frame counts per animation key, e.g. `"player/down_attack"`.
    pub animation_frames: HashMap<String, usize>,
    pub default_frame_count: usize,
    /// Fixed RNG seed; a random one is drawn per level when absent.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tile_size: 64.0,
            hitbox_insets: HitboxInsets::default(),
            player: PlayerSettings::default(),
            enemy: EnemySettings::default(),
            particle_animation_speed: 0.15,
            particle_size: 64.0,
            leaf_offset: 75.0,
            grass_variants: 3,
            leaf_variants: 6,
            animation_frames: HashMap::new(),
            default_frame_count: 4,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Number of frames in the animation named `key`.
    pub fn frame_count(&self, key: &str) -> usize {
        self.animation_frames
            .get(key)
            .copied()
            .unwrap_or(self.default_frame_count)
    }

    /// Load settings from the RON file, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(SETTINGS_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(settings) => {
                    info!("Loaded game settings from {}", SETTINGS_PATH);
                    settings
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", SETTINGS_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", SETTINGS_PATH, e);
                Self::default()
            }
        }
    }
}

/// System to load game settings at startup.
pub fn load_game_settings(mut commands: Commands) {
    commands.insert_resource(GameSettings::load());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: GameSettings =
            ron::from_str("(tile_size: 32.0, player: (speed: 7.0))").expect("valid settings");
        assert_eq!(settings.tile_size, 32.0);
        assert_eq!(settings.player.speed, 7.0);
        assert_eq!(settings.player.base_attack_cooldown, 400);
        assert_eq!(settings.enemy.invincibility_duration, 300);
    }

    #[test]
    fn frame_count_falls_back_to_default() {
        let mut settings = GameSettings::default();
        settings
            .animation_frames
            .insert("player/down".to_string(), 2);
        assert_eq!(settings.frame_count("player/down"), 2);
        assert_eq!(settings.frame_count("squid/idle"), 4);
    }
}
