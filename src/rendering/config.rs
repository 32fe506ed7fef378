//! Render configuration loaded from an external RON file.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use super::draw::FLOOR_IMAGE;

const RENDER_CONFIG_PATH: &str = "assets/data/rendering/render_config.ron";

/// Render configuration loaded from assets/data/rendering/render_config.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Size of the visible world area, in pixels.
    pub viewport: (f32, f32),
    pub clear_color: (f32, f32, f32),
    pub floor_image: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport: (1280.0, 720.0),
            clear_color: (0.44, 0.78, 0.81),
            floor_image: FLOOR_IMAGE.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport.0, self.viewport.1)
    }

    /// Load render config from RON file.
    pub fn load() -> Self {
        match fs::read_to_string(RENDER_CONFIG_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded render config from {}", RENDER_CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", RENDER_CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", RENDER_CONFIG_PATH, e);
                Self::default()
            }
        }
    }
}

/// System to load render config at startup.
pub fn load_render_config(mut commands: Commands) {
    let config = RenderConfig::load();
    let (r, g, b) = config.clear_color;
    commands.insert_resource(ClearColor(Color::srgb(r, g, b)));
    commands.insert_resource(config);
}
