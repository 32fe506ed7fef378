//! Spell effects.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

use super::data::{SpellDefinition, SpellKind};
use crate::core::{GameSettings, SoundCue, SpellCast, WorldEffects};
use crate::player::Player;

/// Number of flame particles in a flame cast.
pub const FLAME_LENGTH: usize = 5;

/// Height above the player's centre where the heal sparkle appears.
const HEAL_SPARKLE_OFFSET: f32 = 60.0;

/// Casts `spell` for the player. Does nothing without enough mana.
///
/// Returns whether the spell went off.
pub fn cast_spell(
    player: &mut Player,
    spell: &SpellDefinition,
    cast: &SpellCast,
    settings: &GameSettings,
    rng: &mut StdRng,
    effects: &mut dyn WorldEffects,
) -> bool {
    if player.stats.mana.current < cast.cost {
        return false;
    }

    match spell.kind {
        SpellKind::Heal => heal(player, cast, effects),
        SpellKind::Flame => flame(player, cast, settings, rng, effects),
    }
    true
}

fn heal(player: &mut Player, cast: &SpellCast, effects: &mut dyn WorldEffects) {
    player.stats.health.add(cast.strength);
    player.stats.mana.add(-cast.cost);

    let center = player.body.center();
    effects.play_sound(SoundCue::new("heal"));
    effects.spawn_particles("aura", center);
    effects.spawn_particles("heal", center - Vec2::new(0.0, HEAL_SPARKLE_OFFSET));
}

fn flame(
    player: &mut Player,
    cast: &SpellCast,
    settings: &GameSettings,
    rng: &mut StdRng,
    effects: &mut dyn WorldEffects,
) {
    player.stats.mana.add(-cast.cost);
    effects.play_sound(SoundCue::new("flame"));

    let tile = settings.tile_size;
    let jitter = tile / 3.0;
    let center = player.body.center();
    let direction = player.status.facing.unit();

    for step in 1..=FLAME_LENGTH {
        let ahead = center + direction * tile * step as f32;
        let offset = Vec2::new(
            rng.gen_range(-jitter..=jitter),
            rng.gen_range(-jitter..=jitter),
        );
        effects.spawn_spell_hitbox("flame", ahead + offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EffectQueue, EntityId, Facing, WorldEffect};
    use rand::SeedableRng;

    fn spell(kind: SpellKind, strength: f32, cost: f32) -> SpellDefinition {
        SpellDefinition {
            name: format!("{kind:?}").to_lowercase(),
            kind,
            strength,
            cost,
        }
    }

    fn player() -> Player {
        Player::new(EntityId(0), Vec2::ZERO, &GameSettings::default())
    }

    #[test]
    fn heal_is_clamped_to_max_health() {
        let mut player = player();
        player.stats.health.current = 90.0;
        let heal = spell(SpellKind::Heal, 20.0, 10.0);
        let cast = SpellCast {
            spell: 1,
            strength: 24.0,
            cost: 10.0,
        };
        let mut effects = EffectQueue::default();

        assert!(cast_spell(
            &mut player,
            &heal,
            &cast,
            &GameSettings::default(),
            &mut StdRng::seed_from_u64(0),
            &mut effects,
        ));
        assert_eq!(player.stats.health.current, 100.0);
        assert_eq!(player.stats.mana.current, 50.0);
        assert!(effects.as_slice().contains(&WorldEffect::SpawnParticles {
            name: "heal".into(),
            position: Vec2::new(32.0, -28.0),
        }));
    }

    #[test]
    fn flame_spawns_a_line_of_hitboxes() {
        let mut player = player();
        player.status.facing = Facing::Right;
        let flame = spell(SpellKind::Flame, 5.0, 20.0);
        let cast = SpellCast {
            spell: 0,
            strength: 9.0,
            cost: 20.0,
        };
        let settings = GameSettings::default();
        let mut effects = EffectQueue::default();

        cast_spell(
            &mut player,
            &flame,
            &cast,
            &settings,
            &mut StdRng::seed_from_u64(42),
            &mut effects,
        );

        let positions: Vec<Vec2> = effects
            .as_slice()
            .iter()
            .filter_map(|effect| match effect {
                WorldEffect::SpawnSpellHitbox { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        assert_eq!(positions.len(), FLAME_LENGTH);
        let jitter = settings.tile_size / 3.0;
        for (i, position) in positions.iter().enumerate() {
            let expected_x = 32.0 + settings.tile_size * (i + 1) as f32;
            assert!((position.x - expected_x).abs() <= jitter);
            assert!((position.y - 32.0).abs() <= jitter);
        }
        assert_eq!(player.stats.mana.current, 40.0);
    }

    #[test]
    fn insufficient_mana_is_a_no_op() {
        let mut player = player();
        player.stats.mana.current = 5.0;
        let mut effects = EffectQueue::default();
        let cast = SpellCast {
            spell: 0,
            strength: 9.0,
            cost: 20.0,
        };
        assert!(!cast_spell(
            &mut player,
            &spell(SpellKind::Flame, 5.0, 20.0),
            &cast,
            &GameSettings::default(),
            &mut StdRng::seed_from_u64(0),
            &mut effects,
        ));
        assert!(effects.is_empty());
        assert_eq!(player.stats.mana.current, 5.0);
    }
}
