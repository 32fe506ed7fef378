//! Enemy behaviour: state derivation, attacks, knockback, and death.

use bevy::log::debug;
use bevy::math::Vec2;

use super::components::{Enemy, EnemyState};
use crate::core::{wave_value, FrameContext, SoundCue, WorldEffects};

impl Enemy {
    /// Runs one frame against the player's current render centre.
    pub fn update(
        &mut self,
        player_center: Vec2,
        ctx: &FrameContext,
        effects: &mut dyn WorldEffects,
    ) {
        let previous = self.state;
        self.state = self.derive_state(player_center);
        self.act(previous, player_center, ctx, effects);
        self.animate(ctx);

        let speed = if self.vulnerable {
            self.species.speed
        } else {
            self.body.direction = self.knockback;
            ctx.settings.enemy.knockback_force / self.species.resistance.max(f32::EPSILON)
        };
        self.body.move_by(speed, ctx.obstacles);

        self.cooldowns(ctx);
    }

    /// Level-triggered: computed from scratch every frame.
    fn derive_state(&self, player_center: Vec2) -> EnemyState {
        let distance = self.body.distance_to(player_center);
        let mut state = EnemyState::Idle;
        if distance <= self.species.notice_radius {
            state = EnemyState::Move;
        }
        if distance <= self.species.attack_radius && self.can_attack {
            state = EnemyState::Attack;
        }
        state
    }

    fn act(
        &mut self,
        previous: EnemyState,
        player_center: Vec2,
        ctx: &FrameContext,
        effects: &mut dyn WorldEffects,
    ) {
        match self.state {
            EnemyState::Attack => {
                self.body.direction = Vec2::ZERO;
                if previous != EnemyState::Attack {
                    self.attack_time = ctx.now;
                    self.animator.reset();
                    effects.damage_player(self.species.damage, &self.species.attack_type);
                    if let Some(sound) = &self.species.attack_sound {
                        effects.play_sound(SoundCue::new(sound.as_str()));
                    }
                }
            }
            EnemyState::Move => {
                self.body.direction = self.body.direction_to(player_center);
            }
            EnemyState::Idle => {
                self.body.direction = Vec2::ZERO;
            }
        }
    }

    fn animate(&mut self, ctx: &FrameContext) {
        let key = format!("{}/{}", self.species.name, self.state.as_str());
        let frames = ctx.settings.frame_count(&key);
        let speed = match self.state {
            EnemyState::Attack => self.species.attack_animation_speed,
            _ => ctx.settings.enemy.animation_speed,
        };

        // The attack animation plays once, then the cooldown starts
        if self.animator.advance(speed, frames) && self.state == EnemyState::Attack {
            self.can_attack = false;
            self.attack_time = ctx.now;
        }

        self.alpha = if self.vulnerable {
            255
        } else {
            wave_value(ctx.now)
        };
    }

    fn cooldowns(&mut self, ctx: &FrameContext) {
        if !self.can_attack
            && ctx.now.saturating_sub(self.attack_time) >= self.species.attack_cooldown
        {
            self.can_attack = true;
        }

        if !self.vulnerable
            && ctx.now.saturating_sub(self.hit_time) >= ctx.settings.enemy.invincibility_duration
        {
            self.vulnerable = true;
        }
    }

    /// Applies a hit from something at `attacker_center` and aims the
    /// knockback away from it. Ignored while invulnerable; returns whether
    /// the hit landed.
    pub fn take_damage(&mut self, attacker_center: Vec2, amount: f32, now: u64) -> bool {
        if !self.vulnerable {
            return false;
        }
        self.knockback = -self.body.direction_to(attacker_center);
        self.health -= amount;
        self.vulnerable = false;
        self.hit_time = now;
        true
    }

    /// Handles death once health is exhausted. Returns `true` if the enemy is
    /// dead and should be removed.
    pub fn check_death(&mut self, effects: &mut dyn WorldEffects) -> bool {
        if self.dead {
            return true;
        }
        if self.health > 0.0 {
            return false;
        }

        self.dead = true;
        debug!("{} {:?} died", self.species.name, self.id);
        effects.spawn_particles(&self.species.name, self.body.center());
        effects.award_exp(self.species.exp);
        effects.play_sound(SoundCue::new("death"));
        true
    }
}
