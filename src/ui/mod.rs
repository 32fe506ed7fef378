//! UI module - HUD and menu overlays.

mod hud;
mod plugin;

pub use plugin::UiPlugin;
