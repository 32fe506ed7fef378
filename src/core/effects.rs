//! World effects requested by controllers.
//!
//! Controllers never touch the level's containers directly. They ask for
//! things to happen through [`WorldEffects`]; the level queues the requests
//! and applies them between update phases.

use bevy::math::Vec2;
use bevy::prelude::Event;

/// What produced an attack hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    /// The equipped weapon's swing.
    Weapon,
    /// A damaging spell particle.
    Magic,
}

/// A spell the player wants to cast this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellCast {
    /// Index into the ordered spell catalog.
    pub spell: usize,
    /// Magic stat plus the spell's own strength.
    pub strength: f32,
    pub cost: f32,
}

/// Name of a fire-and-forget sound effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundCue(pub String);

impl SoundCue {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn asset_path(&self) -> String {
        format!("audio/{}.wav", self.0)
    }
}

/// Sent once per cue produced by a simulation frame.
#[derive(Event, Debug, Clone)]
pub struct SoundCueEvent(pub SoundCue);

/// A single queued request.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEffect {
    SpawnAttack,
    ClearAttack,
    DamagePlayer { amount: f32, attack_type: String },
    SpawnParticles { name: String, position: Vec2 },
    SpawnSpellHitbox { name: String, position: Vec2 },
    CastSpell(SpellCast),
    AwardExp(u32),
    PlaySound(SoundCue),
}

/// The narrow capability set controllers may use to affect the world.
pub trait WorldEffects {
    /// Create the weapon hitbox for the player's current facing and weapon.
    fn spawn_attack(&mut self);
    /// Remove the current weapon hitbox, if any.
    fn clear_attack(&mut self);
    /// Damage the player unless they are invulnerable.
    fn damage_player(&mut self, amount: f32, attack_type: &str);
    fn spawn_particles(&mut self, name: &str, position: Vec2);
    /// Spawn a particle that also damages whatever it overlaps.
    fn spawn_spell_hitbox(&mut self, name: &str, position: Vec2);
    fn cast_spell(&mut self, cast: SpellCast);
    fn award_exp(&mut self, amount: u32);
    fn play_sound(&mut self, cue: SoundCue);
}

/// Ordered queue of effects, drained by the level between phases.
#[derive(Debug, Default)]
pub struct EffectQueue {
    effects: Vec<WorldEffect>,
}

impl EffectQueue {
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn as_slice(&self) -> &[WorldEffect] {
        &self.effects
    }

    /// Takes every queued effect, leaving the queue empty.
    pub fn take(&mut self) -> Vec<WorldEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl WorldEffects for EffectQueue {
    fn spawn_attack(&mut self) {
        self.effects.push(WorldEffect::SpawnAttack);
    }

    fn clear_attack(&mut self) {
        self.effects.push(WorldEffect::ClearAttack);
    }

    fn damage_player(&mut self, amount: f32, attack_type: &str) {
        self.effects.push(WorldEffect::DamagePlayer {
            amount,
            attack_type: attack_type.to_string(),
        });
    }

    fn spawn_particles(&mut self, name: &str, position: Vec2) {
        self.effects.push(WorldEffect::SpawnParticles {
            name: name.to_string(),
            position,
        });
    }

    fn spawn_spell_hitbox(&mut self, name: &str, position: Vec2) {
        self.effects.push(WorldEffect::SpawnSpellHitbox {
            name: name.to_string(),
            position,
        });
    }

    fn cast_spell(&mut self, cast: SpellCast) {
        self.effects.push(WorldEffect::CastSpell(cast));
    }

    fn award_exp(&mut self, amount: u32) {
        self.effects.push(WorldEffect::AwardExp(amount));
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.effects.push(WorldEffect::PlaySound(cue));
    }
}
