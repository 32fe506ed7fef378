//! The level coordinator: owns every entity and runs the frame.

use bevy::log::{debug, info};
use bevy::math::{Rect, Vec2};
use rand::rngs::StdRng;
use std::sync::Arc;

use super::catalog::GameCatalog;
use super::tile::Tile;
use crate::combat::{
    cast_spell, resolve_attacks, weapon_hitbox, AttackHitbox, Particle, Strike, StrikePower,
};
use crate::core::{
    AttackKind, EffectQueue, FrameContext, GameSettings, IdAllocator, SoundCue, WorldEffect,
};
use crate::enemies::Enemy;
use crate::player::{InputIntent, Player, PlayerSnapshot};
use crate::rendering::{depth_sort, DrawCall, RenderSurface, SpriteInstance, Visual};

/// What a frame produced for the outside world.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Sound cues in the order they were requested.
    pub sounds: Vec<SoundCue>,
    pub player_defeated: bool,
}

/// A running level.
///
/// Built by [`build_level`](super::build_level). One list per entity kind plus
/// the obstacle index derived from `tiles`.
pub struct Level {
    pub(crate) name: String,
    pub(crate) settings: Arc<GameSettings>,
    pub(crate) catalog: Arc<GameCatalog>,
    pub(crate) player: Player,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) tiles: Vec<Tile>,
    pub(crate) obstacles: Vec<Rect>,
    pub(crate) current_attack: Option<AttackHitbox>,
    pub(crate) particles: Vec<Particle>,
    pub(crate) effects: EffectQueue,
    pub(crate) sounds: Vec<SoundCue>,
    pub(crate) rng: StdRng,
    pub(crate) ids: IdAllocator,
    pub(crate) now: u64,
    pub(crate) floor_size: Vec2,
}

impl Level {
    /// Advances the simulation by one frame at time `now` (ms).
    pub fn run_frame(&mut self, input: &InputIntent, now: u64) -> FrameReport {
        self.now = now;

        let ctx = FrameContext {
            now,
            settings: &self.settings,
            catalog: &self.catalog,
            obstacles: &self.obstacles,
        };
        self.player.update(input, &ctx, &mut self.effects);
        self.apply_effects();

        let player_center = self.player.body.center();
        let ctx = FrameContext {
            now,
            settings: &self.settings,
            catalog: &self.catalog,
            obstacles: &self.obstacles,
        };
        for enemy in &mut self.enemies {
            enemy.update(player_center, &ctx, &mut self.effects);
        }
        self.apply_effects();

        self.advance_particles();

        let strikes = self.strikes();
        let power = StrikePower {
            origin: player_center,
            weapon: self.player.weapon_damage(&self.catalog.arsenal),
            magic: self.player.spell_damage(&self.catalog.arsenal),
        };
        let ctx = FrameContext {
            now,
            settings: &self.settings,
            catalog: &self.catalog,
            obstacles: &self.obstacles,
        };
        let outcome = resolve_attacks(
            &strikes,
            power,
            &mut self.tiles,
            &mut self.enemies,
            &ctx,
            &mut self.rng,
            &mut self.effects,
        );
        if outcome.tiles_destroyed > 0 {
            self.rebuild_obstacles();
        }
        self.apply_effects();

        let effects = &mut self.effects;
        self.enemies.retain_mut(|enemy| !enemy.check_death(effects));
        self.apply_effects();

        FrameReport {
            sounds: std::mem::take(&mut self.sounds),
            player_defeated: self.player.is_defeated(),
        }
    }

    /// Applies queued effects until none remain; applying one effect may
    /// queue more.
    fn apply_effects(&mut self) {
        loop {
            let batch = self.effects.take();
            if batch.is_empty() {
                break;
            }
            for effect in batch {
                self.apply(effect);
            }
        }
    }

    fn apply(&mut self, effect: WorldEffect) {
        match effect {
            WorldEffect::SpawnAttack => {
                let Some(weapon) = self.catalog.arsenal.weapon(self.player.weapon_index) else {
                    return;
                };
                let facing = self.player.status.facing;
                self.current_attack = Some(AttackHitbox {
                    id: self.ids.next_id(),
                    kind: AttackKind::Weapon,
                    rect: weapon_hitbox(self.player.body.rect, facing, weapon),
                    weapon: weapon.name.clone(),
                    facing,
                });
            }
            WorldEffect::ClearAttack => self.current_attack = None,
            WorldEffect::DamagePlayer {
                amount,
                attack_type,
            } => {
                if self.player.receive_damage(amount, self.now) {
                    let center = self.player.body.center();
                    self.spawn_particle(&attack_type, center, false);
                    if self.player.is_defeated() {
                        info!("Player defeated in {}", self.name);
                    }
                }
            }
            WorldEffect::SpawnParticles { name, position } => {
                self.spawn_particle(&name, position, false);
            }
            WorldEffect::SpawnSpellHitbox { name, position } => {
                self.spawn_particle(&name, position, true);
            }
            WorldEffect::CastSpell(cast) => {
                if let Some(spell) = self.catalog.arsenal.spell(cast.spell) {
                    cast_spell(
                        &mut self.player,
                        spell,
                        &cast,
                        &self.settings,
                        &mut self.rng,
                        &mut self.effects,
                    );
                }
            }
            WorldEffect::AwardExp(amount) => self.player.exp += amount,
            WorldEffect::PlaySound(cue) => self.sounds.push(cue),
        }
    }

    fn spawn_particle(&mut self, name: &str, center: Vec2, damaging: bool) {
        let id = self.ids.next_id();
        self.particles.push(Particle::new(
            id,
            name,
            center,
            self.settings.particle_size,
            damaging,
        ));
    }

    fn advance_particles(&mut self) {
        let settings = &self.settings;
        self.particles.retain_mut(|particle| {
            let frames = settings.frame_count(&particle.animation_key());
            !particle.advance(settings.particle_animation_speed, frames)
        });
    }

    /// The weapon hitbox, then every damaging particle.
    fn strikes(&self) -> Vec<Strike> {
        self.current_attack
            .iter()
            .map(|attack| Strike {
                kind: attack.kind,
                rect: attack.rect,
            })
            .chain(
                self.particles
                    .iter()
                    .filter(|particle| particle.damaging)
                    .map(|particle| Strike {
                        kind: AttackKind::Magic,
                        rect: particle.rect,
                    }),
            )
            .collect()
    }

    pub(crate) fn rebuild_obstacles(&mut self) {
        self.obstacles = self.tiles.iter().map(|tile| tile.hitbox).collect();
        debug!("Obstacle index rebuilt: {} obstacles", self.obstacles.len());
    }

    /// Top-left of the viewport in world pixels, centred on the player.
    pub fn camera_offset(&self, viewport: Vec2) -> Vec2 {
        self.player.body.center() - viewport / 2.0
    }

    /// Emits the floor, then every visible sprite back-to-front.
    pub fn render(&self, viewport: Vec2, surface: &mut dyn RenderSurface) {
        let offset = self.camera_offset(viewport);
        surface.draw(&DrawCall {
            id: None,
            visual: Visual::Floor,
            position: -offset,
            size: self.floor_size,
            alpha: 255,
        });

        let mut sprites = self.sprites();
        depth_sort(&mut sprites);
        for sprite in &sprites {
            surface.draw(&sprite.to_draw_call(offset));
        }
    }

    fn sprites(&self) -> Vec<SpriteInstance> {
        let mut sprites = Vec::with_capacity(
            self.tiles.len() + self.enemies.len() + self.particles.len() + 2,
        );

        sprites.extend(self.tiles.iter().filter(|tile| tile.is_visible()).map(|tile| {
            SpriteInstance {
                id: tile.id,
                rect: tile.rect,
                visual: Visual::Tile {
                    kind: tile.kind,
                    variant: tile.variant,
                },
                alpha: 255,
            }
        }));

        sprites.push(SpriteInstance {
            id: self.player.id,
            rect: self.player.body.rect,
            visual: Visual::Player {
                status: self.player.status,
                frame: self.player.animator.frame(),
            },
            alpha: self.player.alpha,
        });

        sprites.extend(self.enemies.iter().map(|enemy| SpriteInstance {
            id: enemy.id,
            rect: enemy.body.rect,
            visual: Visual::Enemy {
                species: enemy.species.name.clone(),
                state: enemy.state,
                frame: enemy.animator.frame(),
            },
            alpha: enemy.alpha,
        }));

        if let Some(attack) = &self.current_attack {
            sprites.push(SpriteInstance {
                id: attack.id,
                rect: attack.rect,
                visual: Visual::Weapon {
                    name: attack.weapon.clone(),
                    facing: attack.facing,
                },
                alpha: 255,
            });
        }

        sprites.extend(self.particles.iter().map(|particle| SpriteInstance {
            id: particle.id,
            rect: particle.rect,
            visual: Visual::Particle {
                name: particle.name.clone(),
                frame: particle.animator.frame(),
            },
            alpha: 255,
        }));

        sprites
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn current_attack(&self) -> Option<&AttackHitbox> {
        self.current_attack.as_ref()
    }

    pub fn player_snapshot(&self) -> PlayerSnapshot {
        self.player.snapshot(&self.catalog.arsenal)
    }
}
