//! Core game module - states, shared motion primitives, effects, and settings.
//!
//! This module provides the foundation that all other game systems build upon.

mod animation;
mod body;
mod effects;
mod frame;
mod plugin;
mod settings;
mod states;

pub use animation::Animator;
pub use body::*;
pub use effects::*;
pub use frame::FrameContext;
pub use plugin::{CorePlugin, FrameSet, FRAMES_PER_SECOND};
pub use settings::*;
pub use states::*;
