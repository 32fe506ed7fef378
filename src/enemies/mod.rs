//! Enemies module - monster species, state machine, and knockback.

mod ai;
mod components;
pub mod data;
mod plugin;

pub use components::*;
pub use data::{MonsterDefinition, MonsterRegistry};
pub use plugin::EnemyPlugin;
