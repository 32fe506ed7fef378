//! Level construction from data definitions.

use bevy::log::info;
use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use super::catalog::GameCatalog;
use super::data::{LevelDefinition, SpawnKind, EMPTY_CELL};
use super::error::LevelBuildError;
use super::level::Level;
use super::tile::{Tile, TileKind};
use crate::core::{EffectQueue, GameSettings, IdAllocator};
use crate::enemies::Enemy;
use crate::player::Player;

/// Builds a playable level.
///
/// Layers are visited in the order boundary, grass, large objects, entities,
/// row by row, and ids are handed out in that order. Any inconsistency
/// between the map, its legend, and the catalogs fails the whole build.
pub fn build_level(
    definition: &LevelDefinition,
    settings: Arc<GameSettings>,
    catalog: Arc<GameCatalog>,
    seed: u64,
) -> Result<Level, LevelBuildError> {
    if catalog.arsenal.weapons.is_empty() {
        return Err(LevelBuildError::EmptyCatalog("weapon"));
    }
    if catalog.arsenal.spells.is_empty() {
        return Err(LevelBuildError::EmptyCatalog("spell"));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut ids = IdAllocator::default();
    let tile = settings.tile_size;
    let cell_origin = |row: usize, column: usize| Vec2::new(column as f32 * tile, row as f32 * tile);

    let mut tiles = Vec::new();
    for (kind, grid) in [
        (TileKind::Boundary, &definition.boundary),
        (TileKind::Grass, &definition.grass),
        (TileKind::LargeObject, &definition.large_objects),
    ] {
        for (row, cells) in grid.iter().enumerate() {
            for (column, &code) in cells.iter().enumerate() {
                if code == EMPTY_CELL {
                    continue;
                }
                let variant = match kind {
                    TileKind::Grass => rng.gen_range(1..=settings.grass_variants.max(1)),
                    _ => usize::try_from(code)
                        .map_err(|_| LevelBuildError::InvalidObjectCode { code, row, column })?,
                };
                tiles.push(Tile::new(
                    ids.next_id(),
                    kind,
                    cell_origin(row, column),
                    variant,
                    &settings,
                ));
            }
        }
    }

    let mut player = None;
    let mut enemies = Vec::new();
    for (row, cells) in definition.entities.iter().enumerate() {
        for (column, &code) in cells.iter().enumerate() {
            if code == EMPTY_CELL {
                continue;
            }
            let spawn = definition
                .legend
                .get(&code)
                .ok_or(LevelBuildError::UnknownSpawnCode { code, row, column })?;
            let origin = cell_origin(row, column);

            match spawn {
                SpawnKind::Player => {
                    if player.is_some() {
                        return Err(LevelBuildError::DuplicatePlayerSpawn { row, column });
                    }
                    player = Some(Player::new(ids.next_id(), origin, &settings));
                }
                SpawnKind::Monster(species) => {
                    let definition = catalog.monsters.get(species).ok_or_else(|| {
                        LevelBuildError::UnknownSpecies {
                            species: species.clone(),
                            row,
                            column,
                        }
                    })?;
                    enemies.push(Enemy::new(
                        ids.next_id(),
                        Arc::clone(definition),
                        origin,
                        &settings,
                    ));
                }
            }
        }
    }
    let player = player.ok_or(LevelBuildError::MissingPlayerSpawn)?;

    info!(
        "Built level '{}': {} tiles, {} enemies",
        definition.name,
        tiles.len(),
        enemies.len()
    );

    let floor_size = Vec2::new(
        definition.width as f32 * tile,
        definition.height as f32 * tile,
    );
    let mut level = Level {
        name: definition.name.clone(),
        settings,
        catalog,
        player,
        enemies,
        tiles,
        obstacles: Vec::new(),
        current_attack: None,
        particles: Vec::new(),
        effects: EffectQueue::default(),
        sounds: Vec::new(),
        rng,
        ids,
        now: 0,
        floor_size,
    };
    level.rebuild_obstacles();
    Ok(level)
}
