//! Rendering plugin - mirrors the level's draw calls onto Bevy sprites.
//!
//! The level emits screen-space draw calls (y down, origin top-left). Each
//! call keeps one sprite entity alive, keyed by the level's entity id; sprites
//! whose id stops appearing are despawned.

use bevy::prelude::*;
use std::collections::HashMap;

use super::config::{load_render_config, RenderConfig};
use super::draw::{DrawCall, Visual};
use crate::core::{EntityId, GameState};
use crate::world::ActiveLevel;

/// Spacing between consecutive draw calls on the z axis.
const Z_STEP: f32 = 0.001;

/// Rendering plugin - camera and sprite sync.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteIndex>()
            .add_systems(Startup, (load_render_config, spawn_camera))
            .add_systems(
                Update,
                sync_world_sprites.run_if(not(in_state(GameState::Loading))),
            );
    }
}

/// Marker for sprites mirrored from the level.
#[derive(Component)]
pub struct WorldSprite;

/// Sprite entity per level entity (`None` is the floor), plus loaded images.
#[derive(Resource, Default)]
pub struct SpriteIndex {
    sprites: HashMap<Option<EntityId>, Entity>,
    images: HashMap<String, Handle<Image>>,
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Rebuild the sprite set from this frame's draw calls.
fn sync_world_sprites(
    mut commands: Commands,
    level: Option<Res<ActiveLevel>>,
    config: Res<RenderConfig>,
    asset_server: Res<AssetServer>,
    mut index: ResMut<SpriteIndex>,
    mut sprites: Query<(&mut Sprite, &mut Transform), With<WorldSprite>>,
) {
    let Some(level) = level else {
        for (_, entity) in index.sprites.drain() {
            commands.entity(entity).despawn();
        }
        return;
    };

    let viewport = config.viewport_size();
    let mut calls: Vec<DrawCall> = Vec::new();
    level.0.render(viewport, &mut calls);

    let SpriteIndex {
        sprites: entities,
        images,
    } = &mut *index;
    let mut live = HashMap::with_capacity(calls.len());

    for (order, call) in calls.iter().enumerate() {
        let path = match &call.visual {
            Visual::Floor => config.floor_image.clone(),
            visual => visual.asset_path(),
        };
        let image = images
            .entry(path)
            .or_insert_with_key(|path| asset_server.load(path.clone()))
            .clone();
        let transform = screen_to_world(call, viewport, order);
        let color = Color::srgba(1.0, 1.0, 1.0, call.alpha as f32 / 255.0);

        let existing = entities
            .remove(&call.id)
            .filter(|entity| sprites.contains(*entity));
        let entity = match existing {
            Some(entity) => {
                if let Ok((mut sprite, mut current)) = sprites.get_mut(entity) {
                    sprite.image = image;
                    sprite.custom_size = Some(call.size);
                    sprite.color = color;
                    *current = transform;
                }
                entity
            }
            None => commands
                .spawn((
                    Sprite {
                        image,
                        custom_size: Some(call.size),
                        color,
                        ..default()
                    },
                    transform,
                    WorldSprite,
                ))
                .id(),
        };
        live.insert(call.id, entity);
    }

    // Whatever was not drawn this frame is gone from the level
    for (_, entity) in entities.drain() {
        commands.entity(entity).despawn();
    }
    *entities = live;
}

/// Converts a top-left, y-down screen rect into a centred, y-up transform
/// for a camera at the origin.
fn screen_to_world(call: &DrawCall, viewport: Vec2, order: usize) -> Transform {
    let center = call.position + call.size / 2.0;
    Transform::from_xyz(
        center.x - viewport.x / 2.0,
        viewport.y / 2.0 - center.y,
        order as f32 * Z_STEP,
    )
}
