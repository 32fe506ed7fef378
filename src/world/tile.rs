//! Static map objects.

use bevy::math::{Rect, Vec2};

use crate::core::{EntityId, GameSettings, RectExt};

/// What a tile is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Invisible map edge.
    Boundary,
    /// Visible, blocking, destroyed by attacks.
    Grass,
    /// Trees, statues, rocks: visible and blocking, two tiles tall.
    LargeObject,
}

/// A static obstacle placed from one of the map layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: EntityId,
    pub kind: TileKind,
    pub rect: Rect,
    pub hitbox: Rect,
    /// Image variant: the random grass image, or the object code.
    pub variant: usize,
}

impl Tile {
    /// Builds a tile for the grid cell whose top-left corner is `cell`.
    pub fn new(
        id: EntityId,
        kind: TileKind,
        cell: Vec2,
        variant: usize,
        settings: &GameSettings,
    ) -> Self {
        let tile = settings.tile_size;
        let insets = &settings.hitbox_insets;
        let (rect, (inset_x, inset_y)) = match kind {
            TileKind::Boundary => (Rect::from_top_left(cell, Vec2::splat(tile)), insets.boundary),
            TileKind::Grass => (Rect::from_top_left(cell, Vec2::splat(tile)), insets.grass),
            // Anchored on the cell's bottom edge, extending one tile upwards
            TileKind::LargeObject => (
                Rect::from_top_left(cell - Vec2::new(0.0, tile), Vec2::new(tile, tile * 2.0)),
                insets.large_object,
            ),
        };

        Self {
            id,
            kind,
            rect,
            hitbox: rect.inflated(inset_x, inset_y),
            variant,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.kind != TileKind::Boundary
    }

    pub fn is_attackable(&self) -> bool {
        self.kind == TileKind::Grass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_objects_extend_upwards() {
        let settings = GameSettings::default();
        let tile = Tile::new(
            EntityId(0),
            TileKind::LargeObject,
            Vec2::new(128.0, 128.0),
            3,
            &settings,
        );
        assert_eq!(tile.rect.top(), 64.0);
        assert_eq!(tile.rect.bottom(), 192.0);
        assert_eq!(tile.hitbox.height(), 88.0);
        assert_eq!(tile.hitbox.center(), tile.rect.center());
    }

    #[test]
    fn only_grass_is_attackable() {
        let settings = GameSettings::default();
        let boundary = Tile::new(EntityId(0), TileKind::Boundary, Vec2::ZERO, 0, &settings);
        let grass = Tile::new(EntityId(1), TileKind::Grass, Vec2::ZERO, 1, &settings);
        assert!(!boundary.is_visible());
        assert!(!boundary.is_attackable());
        assert!(grass.is_attackable());
        assert_eq!(grass.hitbox.height(), 54.0);
    }
}
