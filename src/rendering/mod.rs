//! Rendering module - depth-sorted draw calls and their Bevy sprites.

mod config;
mod draw;
mod plugin;

pub use config::RenderConfig;
pub use draw::*;
pub use plugin::{RenderingPlugin, SpriteIndex, WorldSprite};
