//! Hit detection between active attacks and attackable targets.

use bevy::log::debug;
use bevy::math::{Rect, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{AttackKind, FrameContext, GameSettings, RectExt, SoundCue, WorldEffects};
use crate::enemies::Enemy;
use crate::world::Tile;

/// An attack active this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub kind: AttackKind,
    pub rect: Rect,
}

/// Damage dealt by each kind of strike this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikePower {
    /// Centre of the attacker; struck enemies are knocked away from it.
    pub origin: Vec2,
    pub weapon: f32,
    pub magic: f32,
}

impl StrikePower {
    fn of(&self, kind: AttackKind) -> f32 {
        match kind {
            AttackKind::Weapon => self.weapon,
            AttackKind::Magic => self.magic,
        }
    }
}

/// What one resolution pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub tiles_destroyed: usize,
    pub enemies_hit: usize,
}

/// Tests every strike against grass tiles and enemies.
///
/// Destroyed grass is removed from `tiles` after the scan. Enemies are
/// knocked away from `power.origin`. A strike that keeps overlapping a
/// target calls [`Enemy::take_damage`] every frame; only the target's own
/// invulnerability window filters repeats.
pub fn resolve_attacks(
    strikes: &[Strike],
    power: StrikePower,
    tiles: &mut Vec<Tile>,
    enemies: &mut [Enemy],
    ctx: &FrameContext,
    rng: &mut StdRng,
    effects: &mut dyn WorldEffects,
) -> ResolutionOutcome {
    let mut outcome = ResolutionOutcome::default();
    if strikes.is_empty() {
        return outcome;
    }

    let mut destroyed = Vec::new();
    for strike in strikes {
        for tile in tiles.iter() {
            if !tile.is_attackable() || destroyed.contains(&tile.id) {
                continue;
            }
            if strike.rect.overlaps(&tile.rect) {
                scatter_leaves(tile.rect.center(), ctx.settings, rng, effects);
                destroyed.push(tile.id);
            }
        }

        for enemy in enemies.iter_mut() {
            if enemy.is_dead() || !strike.rect.overlaps(&enemy.body.rect) {
                continue;
            }
            if enemy.take_damage(power.origin, power.of(strike.kind), ctx.now) {
                effects.play_sound(SoundCue::new("hit"));
                outcome.enemies_hit += 1;
            }
        }
    }

    if !destroyed.is_empty() {
        tiles.retain(|tile| !destroyed.contains(&tile.id));
        debug!("Destroyed {} grass tiles", destroyed.len());
    }
    outcome.tiles_destroyed = destroyed.len();
    outcome
}

fn scatter_leaves(
    center: Vec2,
    settings: &GameSettings,
    rng: &mut StdRng,
    effects: &mut dyn WorldEffects,
) {
    let origin = center - Vec2::new(0.0, settings.leaf_offset);
    for _ in 0..rng.gen_range(3..=6) {
        let variant = rng.gen_range(1..=settings.leaf_variants.max(1));
        effects.spawn_particles(&format!("leaf{variant}"), origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EffectQueue, EntityId, WorldEffect};
    use crate::enemies::MonsterDefinition;
    use crate::world::{GameCatalog, TileKind};
    use rand::SeedableRng;
    use std::sync::Arc;

    fn power(origin: Vec2) -> StrikePower {
        StrikePower {
            origin,
            weapon: 25.0,
            magic: 9.0,
        }
    }

    fn frame<'a>(settings: &'a GameSettings, catalog: &'a GameCatalog, now: u64) -> FrameContext<'a> {
        FrameContext {
            now,
            settings,
            catalog,
            obstacles: &[],
        }
    }

    fn grass_at(id: u32, top_left: Vec2, settings: &GameSettings) -> Tile {
        Tile::new(EntityId(id), TileKind::Grass, top_left, 1, settings)
    }

    fn enemy_at(top_left: Vec2, settings: &GameSettings) -> Enemy {
        let species = Arc::new(MonsterDefinition {
            name: "bamboo".into(),
            health: 70.0,
            exp: 120,
            damage: 6.0,
            attack_type: "leaf_attack".into(),
            attack_sound: None,
            speed: 3.0,
            resistance: 3.0,
            attack_radius: 50.0,
            notice_radius: 300.0,
            attack_cooldown: 400,
            attack_animation_speed: 0.15,
        });
        Enemy::new(EntityId(9), species, top_left, settings)
    }

    #[test]
    fn grass_hit_scatters_leaves_and_is_removed() {
        let settings = GameSettings::default();
        let catalog = GameCatalog::default();
        let mut tiles = vec![
            grass_at(0, Vec2::new(68.0, 68.0), &settings),
            grass_at(1, Vec2::new(400.0, 400.0), &settings),
        ];
        let strike = Strike {
            kind: AttackKind::Weapon,
            rect: Rect::from_center_size(Vec2::new(100.0, 100.0), Vec2::splat(20.0)),
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut effects = EffectQueue::default();

        let outcome = resolve_attacks(
            &[strike],
            power(Vec2::ZERO),
            &mut tiles,
            &mut [],
            &frame(&settings, &catalog, 0),
            &mut rng,
            &mut effects,
        );

        assert_eq!(outcome.tiles_destroyed, 1);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].id, EntityId(1));

        let leaves: Vec<_> = effects
            .as_slice()
            .iter()
            .filter_map(|effect| match effect {
                WorldEffect::SpawnParticles { name, position } => Some((name, *position)),
                _ => None,
            })
            .collect();
        assert!((3..=6).contains(&leaves.len()));
        for (name, position) in leaves {
            assert!(name.starts_with("leaf"));
            assert_eq!(position, Vec2::new(100.0, 25.0));
        }
    }

    #[test]
    fn strikes_damage_enemies_by_kind() {
        let settings = GameSettings::default();
        let catalog = GameCatalog::default();
        let mut enemies = vec![enemy_at(Vec2::ZERO, &settings)];
        let mut rng = StdRng::seed_from_u64(1);
        let mut effects = EffectQueue::default();
        let flame = Strike {
            kind: AttackKind::Magic,
            rect: Rect::from_center_size(Vec2::new(32.0, 32.0), Vec2::splat(64.0)),
        };

        let outcome = resolve_attacks(
            &[flame],
            power(Vec2::new(-100.0, 32.0)),
            &mut Vec::new(),
            &mut enemies,
            &frame(&settings, &catalog, 0),
            &mut rng,
            &mut effects,
        );
        assert_eq!(outcome.enemies_hit, 1);
        assert_eq!(enemies[0].health, 61.0);
        assert!(effects
            .as_slice()
            .contains(&WorldEffect::PlaySound(SoundCue::new("hit"))));
    }

    #[test]
    fn overlap_repeats_are_filtered_by_invulnerability() {
        let settings = GameSettings::default();
        let catalog = GameCatalog::default();
        let mut enemies = vec![enemy_at(Vec2::ZERO, &settings)];
        let mut rng = StdRng::seed_from_u64(1);
        let mut effects = EffectQueue::default();
        let sword = Strike {
            kind: AttackKind::Weapon,
            rect: Rect::from_center_size(Vec2::new(70.0, 32.0), Vec2::new(40.0, 20.0)),
        };

        let mut hits = 0;
        for tick in 0..3 {
            hits += resolve_attacks(
                &[sword],
                power(Vec2::new(100.0, 32.0)),
                &mut Vec::new(),
                &mut enemies,
                &frame(&settings, &catalog, tick * 16),
                &mut rng,
                &mut effects,
            )
            .enemies_hit;
        }
        assert_eq!(hits, 1);
        assert_eq!(enemies[0].health, 45.0);
    }

    #[test]
    fn boundaries_and_edge_contact_are_ignored() {
        let settings = GameSettings::default();
        let catalog = GameCatalog::default();
        let mut tiles = vec![
            Tile::new(EntityId(0), TileKind::Boundary, Vec2::ZERO, 0, &settings),
            grass_at(1, Vec2::new(64.0, 0.0), &settings),
        ];
        let strike = Strike {
            kind: AttackKind::Weapon,
            rect: Rect::from_top_left(Vec2::new(20.0, 20.0), Vec2::splat(44.0)),
        };
        let outcome = resolve_attacks(
            &[strike],
            power(Vec2::ZERO),
            &mut tiles,
            &mut [],
            &frame(&settings, &catalog, 0),
            &mut StdRng::seed_from_u64(3),
            &mut EffectQueue::default(),
        );
        assert_eq!(outcome, ResolutionOutcome::default());
        assert_eq!(tiles.len(), 2);
    }
}
