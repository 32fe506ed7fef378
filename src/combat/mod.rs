//! Combat module - weapons, spells, and hit resolution.

mod components;
pub mod data;
mod magic;
mod plugin;
mod resolution;

pub use components::*;
pub use data::{Arsenal, SpellDefinition, SpellKind, WeaponDefinition};
pub use magic::{cast_spell, FLAME_LENGTH};
pub use plugin::CombatPlugin;
pub use resolution::{resolve_attacks, ResolutionOutcome, Strike, StrikePower};
