//! Draw calls produced by the level's render pass.
//!
//! The level knows nothing about Bevy sprites. It emits [`DrawCall`]s in
//! painter's order to a [`RenderSurface`]; the Bevy layer turns them into
//! sprites, and tests collect them into a `Vec`.

use bevy::math::{Rect, Vec2};

use crate::core::{EntityId, Facing};
use crate::enemies::EnemyState;
use crate::player::Status;
use crate::world::TileKind;

/// Image for the ground under everything else.
pub const FLOOR_IMAGE: &str = "graphics/tilemap/ground.png";

/// What to draw: an asset key plus the animation frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Floor,
    Player { status: Status, frame: usize },
    Enemy {
        species: String,
        state: EnemyState,
        frame: usize,
    },
    Tile { kind: TileKind, variant: usize },
    Weapon { name: String, facing: Facing },
    Particle { name: String, frame: usize },
}

impl Visual {
    /// Image path relative to the asset root.
    pub fn asset_path(&self) -> String {
        match self {
            Visual::Floor => FLOOR_IMAGE.to_string(),
            Visual::Player { status, frame } => {
                format!("graphics/player/{}/{}.png", status.animation_key(), frame)
            }
            Visual::Enemy {
                species,
                state,
                frame,
            } => format!(
                "graphics/monsters/{}/{}/{}.png",
                species,
                state.as_str(),
                frame
            ),
            Visual::Tile { kind, variant } => match kind {
                TileKind::Grass => format!("graphics/grass/grass_{variant}.png"),
                TileKind::LargeObject => format!("graphics/objects/{variant:02}.png"),
                // Never drawn
                TileKind::Boundary => String::new(),
            },
            Visual::Weapon { name, facing } => {
                format!("graphics/weapons/{}/{}.png", name, facing.as_str())
            }
            Visual::Particle { name, frame } => {
                format!("graphics/particles/{name}/{frame}.png")
            }
        }
    }
}

/// A world-space sprite awaiting depth sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteInstance {
    pub id: EntityId,
    pub rect: Rect,
    pub visual: Visual,
    pub alpha: u8,
}

impl SpriteInstance {
    /// Projects into screen space given the camera offset.
    pub fn to_draw_call(&self, offset: Vec2) -> DrawCall {
        DrawCall {
            id: Some(self.id),
            visual: self.visual.clone(),
            position: self.rect.min - offset,
            size: self.rect.size(),
            alpha: self.alpha,
        }
    }
}

/// Sorts back-to-front: ascending centre y, creation order on ties.
pub fn depth_sort(sprites: &mut [SpriteInstance]) {
    sprites.sort_by(|a, b| {
        a.rect
            .center()
            .y
            .total_cmp(&b.rect.center().y)
            .then(a.id.cmp(&b.id))
    });
}

/// One sprite placed on screen. `position` is the top-left corner in
/// screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// `None` for the floor.
    pub id: Option<EntityId>,
    pub visual: Visual,
    pub position: Vec2,
    pub size: Vec2,
    pub alpha: u8,
}

/// Receives draw calls in painter's order.
pub trait RenderSurface {
    fn draw(&mut self, call: &DrawCall);
}

impl RenderSurface for Vec<DrawCall> {
    fn draw(&mut self, call: &DrawCall) {
        self.push(call.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RectExt;

    fn sprite(id: u32, center_y: f32) -> SpriteInstance {
        SpriteInstance {
            id: EntityId(id),
            rect: Rect::from_center_size(Vec2::new(0.0, center_y), Vec2::splat(64.0)),
            visual: Visual::Particle {
                name: "leaf1".into(),
                frame: 0,
            },
            alpha: 255,
        }
    }

    #[test]
    fn sorts_by_center_then_creation() {
        let mut sprites = vec![sprite(4, 100.0), sprite(1, 300.0), sprite(3, 100.0), sprite(2, 50.0)];
        depth_sort(&mut sprites);
        let order: Vec<u32> = sprites.iter().map(|s| s.id.0).collect();
        assert_eq!(order, vec![2, 3, 4, 1]);
    }

    #[test]
    fn draw_call_is_offset_by_camera() {
        let mut instance = sprite(1, 100.0);
        instance.rect = Rect::from_top_left(Vec2::new(200.0, 100.0), Vec2::splat(64.0));
        let call = instance.to_draw_call(Vec2::new(150.0, 50.0));
        assert_eq!(call.position, Vec2::new(50.0, 50.0));
        assert_eq!(call.size, Vec2::splat(64.0));
    }

    #[test]
    fn asset_paths_name_the_frame() {
        let enemy = Visual::Enemy {
            species: "squid".into(),
            state: EnemyState::Attack,
            frame: 2,
        };
        assert_eq!(enemy.asset_path(), "graphics/monsters/squid/attack/2.png");
        let object = Visual::Tile {
            kind: TileKind::LargeObject,
            variant: 7,
        };
        assert_eq!(object.asset_path(), "graphics/objects/07.png");
    }
}
