//! Read-only inputs shared by every controller during one frame.

use bevy::math::Rect;

use super::settings::GameSettings;
use crate::world::GameCatalog;

/// Everything a controller may read while updating.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// Milliseconds since the session started.
    pub now: u64,
    pub settings: &'a GameSettings,
    pub catalog: &'a GameCatalog,
    /// Hitboxes of every obstacle tile.
    pub obstacles: &'a [Rect],
}
