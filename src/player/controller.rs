//! Per-frame player update: input, cooldowns, status, animation, movement.

use bevy::math::Vec2;

use super::components::*;
use crate::combat::Arsenal;
use crate::core::{wave_value, Facing, FrameContext, GameSettings, SoundCue, SpellCast, WorldEffects};

impl Player {
    /// Runs one frame of the player.
    pub fn update(
        &mut self,
        input: &InputIntent,
        ctx: &FrameContext,
        effects: &mut dyn WorldEffects,
    ) {
        self.handle_input(input, ctx, effects);
        self.cooldowns(ctx, effects);
        self.refresh_status();
        self.animate(ctx);
        self.body.move_by(self.stats.speed.current, ctx.obstacles);
        self.regenerate_mana(ctx.settings);
    }

    /// Turn held keys into direction, facing, and actions. Ignored entirely
    /// while an attack or cast is in progress.
    fn handle_input(
        &mut self,
        input: &InputIntent,
        ctx: &FrameContext,
        effects: &mut dyn WorldEffects,
    ) {
        if self.attacking {
            return;
        }

        self.body.direction.y = if input.up {
            -1.0
        } else if input.down {
            1.0
        } else {
            0.0
        };
        self.body.direction.x = if input.left {
            -1.0
        } else if input.right {
            1.0
        } else {
            0.0
        };

        // Vertical input wins when both axes are held
        if input.up {
            self.status.facing = Facing::Up;
        } else if input.down {
            self.status.facing = Facing::Down;
        } else if input.left {
            self.status.facing = Facing::Left;
        } else if input.right {
            self.status.facing = Facing::Right;
        }

        let arsenal = &ctx.catalog.arsenal;

        if input.attack {
            self.attacking = true;
            self.attack_time = ctx.now;
            effects.spawn_attack();
            effects.play_sound(SoundCue::new("sword"));
        }

        if input.cast {
            if let Some(spell) = arsenal.spell(self.spell_index) {
                self.attacking = true;
                self.attack_time = ctx.now;
                effects.cast_spell(SpellCast {
                    spell: self.spell_index,
                    strength: spell.strength + self.stats.magic.current,
                    cost: spell.cost,
                });
            }
        }

        if input.switch_weapon && self.can_switch_weapon && !arsenal.weapons.is_empty() {
            self.can_switch_weapon = false;
            self.weapon_switch_time = ctx.now;
            self.weapon_index = (self.weapon_index + 1) % arsenal.weapons.len();
        }

        if input.switch_spell && self.can_switch_spell && !arsenal.spells.is_empty() {
            self.can_switch_spell = false;
            self.spell_switch_time = ctx.now;
            self.spell_index = (self.spell_index + 1) % arsenal.spells.len();
        }
    }

    fn cooldowns(&mut self, ctx: &FrameContext, effects: &mut dyn WorldEffects) {
        let now = ctx.now;
        let tuning = &ctx.settings.player;

        if self.attacking {
            let weapon_cooldown = ctx
                .catalog
                .arsenal
                .weapon(self.weapon_index)
                .map_or(0, |weapon| weapon.cooldown);
            if now.saturating_sub(self.attack_time) >= tuning.base_attack_cooldown + weapon_cooldown {
                self.attacking = false;
                effects.clear_attack();
            }
        }

        if !self.can_switch_weapon
            && now.saturating_sub(self.weapon_switch_time) >= tuning.switch_duration_cooldown
        {
            self.can_switch_weapon = true;
        }

        if !self.can_switch_spell
            && now.saturating_sub(self.spell_switch_time) >= tuning.switch_duration_cooldown
        {
            self.can_switch_spell = true;
        }

        if !self.vulnerable
            && now.saturating_sub(self.hurt_time) >= tuning.invulnerability_duration
        {
            self.vulnerable = true;
        }
    }

    fn refresh_status(&mut self) {
        self.status.activity = if self.attacking {
            self.body.direction = Vec2::ZERO;
            Activity::Attacking
        } else if self.body.direction == Vec2::ZERO {
            Activity::Idle
        } else {
            Activity::Walking
        };
    }

    fn animate(&mut self, ctx: &FrameContext) {
        let key = format!("player/{}", self.status.animation_key());
        let frames = ctx.settings.frame_count(&key);
        self.animator
            .advance(ctx.settings.player.animation_speed, frames);

        self.alpha = if self.vulnerable {
            255
        } else {
            wave_value(ctx.now)
        };
    }

    fn regenerate_mana(&mut self, settings: &GameSettings) {
        if !self.stats.mana.is_full() {
            let regen = settings.player.mana_regen_factor * self.stats.magic.current;
            self.stats.mana.add(regen);
        }
    }

    /// Applies enemy damage unless invulnerable. Returns whether it landed.
    pub fn receive_damage(&mut self, amount: f32, now: u64) -> bool {
        if !self.vulnerable {
            return false;
        }
        self.stats.health.add(-amount);
        self.vulnerable = false;
        self.hurt_time = now;
        true
    }

    /// Attack stat plus the equipped weapon's damage.
    pub fn weapon_damage(&self, arsenal: &Arsenal) -> f32 {
        let weapon = arsenal
            .weapon(self.weapon_index)
            .map_or(0.0, |weapon| weapon.damage);
        self.stats.attack.current + weapon
    }

    /// Magic stat plus the selected spell's strength.
    pub fn spell_damage(&self, arsenal: &Arsenal) -> f32 {
        let spell = arsenal
            .spell(self.spell_index)
            .map_or(0.0, |spell| spell.strength);
        self.stats.magic.current + spell
    }

    pub fn snapshot(&self, arsenal: &Arsenal) -> PlayerSnapshot {
        PlayerSnapshot {
            health: self.stats.health,
            mana: self.stats.mana,
            exp: self.exp,
            weapon_index: self.weapon_index,
            weapon_name: arsenal
                .weapon(self.weapon_index)
                .map(|w| w.name.clone())
                .unwrap_or_default(),
            spell_index: self.spell_index,
            spell_name: arsenal
                .spell(self.spell_index)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            can_switch_weapon: self.can_switch_weapon,
            can_switch_spell: self.can_switch_spell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{SpellDefinition, SpellKind, WeaponDefinition};
    use crate::core::{EffectQueue, EntityId, RectExt, WorldEffect};
    use crate::world::GameCatalog;
    use bevy::math::Rect;

    fn catalog() -> GameCatalog {
        GameCatalog {
            arsenal: Arsenal {
                weapons: vec![
                    WeaponDefinition {
                        name: "sword".into(),
                        cooldown: 100,
                        damage: 15.0,
                        reach: 40.0,
                        width: 20.0,
                    },
                    WeaponDefinition {
                        name: "lance".into(),
                        cooldown: 400,
                        damage: 30.0,
                        reach: 60.0,
                        width: 16.0,
                    },
                    WeaponDefinition {
                        name: "axe".into(),
                        cooldown: 300,
                        damage: 20.0,
                        reach: 40.0,
                        width: 24.0,
                    },
                ],
                spells: vec![
                    SpellDefinition {
                        name: "flame".into(),
                        kind: SpellKind::Flame,
                        strength: 5.0,
                        cost: 20.0,
                    },
                    SpellDefinition {
                        name: "heal".into(),
                        kind: SpellKind::Heal,
                        strength: 20.0,
                        cost: 10.0,
                    },
                ],
            },
            ..Default::default()
        }
    }

    struct Harness {
        settings: GameSettings,
        catalog: GameCatalog,
        obstacles: Vec<Rect>,
        effects: EffectQueue,
        player: Player,
    }

    impl Harness {
        fn new() -> Self {
            let settings = GameSettings::default();
            let player = Player::new(EntityId(0), Vec2::ZERO, &settings);
            Self {
                settings,
                catalog: catalog(),
                obstacles: Vec::new(),
                effects: EffectQueue::default(),
                player,
            }
        }

        fn step(&mut self, input: InputIntent, now: u64) {
            let ctx = FrameContext {
                now,
                settings: &self.settings,
                catalog: &self.catalog,
                obstacles: &self.obstacles,
            };
            self.player.update(&input, &ctx, &mut self.effects);
        }
    }

    #[test]
    fn right_input_moves_hitbox_by_speed() {
        let mut h = Harness::new();
        let start = h.player.body.hitbox.left();
        h.step(
            InputIntent {
                right: true,
                ..Default::default()
            },
            16,
        );
        assert_eq!(h.player.body.hitbox.left() - start, 5.0);
        assert_eq!(h.player.status.facing, Facing::Right);
        assert_eq!(h.player.status.activity, Activity::Walking);
    }

    #[test]
    fn vertical_facing_wins_on_diagonal_input() {
        let mut h = Harness::new();
        h.step(
            InputIntent {
                up: true,
                right: true,
                ..Default::default()
            },
            16,
        );
        assert_eq!(h.player.status.facing, Facing::Up);

        h.step(InputIntent::default(), 32);
        assert_eq!(h.player.status.facing, Facing::Up);
        assert_eq!(h.player.status.activity, Activity::Idle);
    }

    #[test]
    fn attacking_freezes_direction_until_cooldown() {
        let mut h = Harness::new();
        h.step(
            InputIntent {
                attack: true,
                right: true,
                ..Default::default()
            },
            0,
        );
        assert!(h.player.attacking);
        assert_eq!(h.player.body.direction, Vec2::ZERO);
        assert_eq!(h.player.status.activity, Activity::Attacking);
        assert!(h.effects.as_slice().contains(&WorldEffect::SpawnAttack));

        // Held input is ignored until base (400) + sword (100) have elapsed
        let x = h.player.body.hitbox.left();
        h.step(
            InputIntent {
                right: true,
                ..Default::default()
            },
            499,
        );
        assert!(h.player.attacking);
        assert_eq!(h.player.body.hitbox.left(), x);

        h.effects.take();
        h.step(InputIntent::default(), 500);
        assert!(!h.player.attacking);
        assert_eq!(h.effects.as_slice(), &[WorldEffect::ClearAttack]);
    }

    #[test]
    fn switch_advances_once_per_cooldown() {
        let mut h = Harness::new();
        let switch = InputIntent {
            switch_weapon: true,
            ..Default::default()
        };
        h.step(switch, 0);
        h.step(switch, 100);
        assert_eq!(h.player.weapon_index, 1);

        h.step(InputIntent::default(), 200);
        h.step(switch, 216);
        assert_eq!(h.player.weapon_index, 2);

        h.step(InputIntent::default(), 416);
        h.step(switch, 432);
        assert_eq!(h.player.weapon_index, 0);
    }

    #[test]
    fn invulnerability_suppresses_damage_until_expiry() {
        let mut h = Harness::new();
        assert!(h.player.receive_damage(10.0, 1000));
        assert!(!h.player.receive_damage(10.0, 1100));
        assert_eq!(h.player.stats.health.current, 90.0);

        h.step(InputIntent::default(), 1499);
        assert!(!h.player.vulnerable);
        assert_eq!(h.player.alpha, wave_value(1499));

        h.step(InputIntent::default(), 1500);
        assert!(h.player.vulnerable);
        assert!(h.player.receive_damage(10.0, 1516));
        assert_eq!(h.player.stats.health.current, 80.0);
    }

    #[test]
    fn mana_regenerates_and_clamps() {
        let mut h = Harness::new();
        h.player.stats.mana.current = 50.0;
        h.step(InputIntent::default(), 16);
        assert!((h.player.stats.mana.current - 50.04).abs() < 1e-4);

        for frame in 0..400 {
            h.step(InputIntent::default(), 32 + frame * 16);
            assert!(h.player.stats.mana.current <= 60.0);
        }
        assert_eq!(h.player.stats.mana.current, 60.0);
    }

    #[test]
    fn cast_requests_spell_with_magic_bonus() {
        let mut h = Harness::new();
        h.step(
            InputIntent {
                cast: true,
                ..Default::default()
            },
            0,
        );
        assert!(h.player.attacking);
        assert!(h.effects.as_slice().contains(&WorldEffect::CastSpell(SpellCast {
            spell: 0,
            strength: 9.0,
            cost: 20.0,
        })));
    }

    #[test]
    fn damage_combines_stats_and_catalog() {
        let mut h = Harness::new();
        assert_eq!(h.player.weapon_damage(&h.catalog.arsenal), 25.0);
        assert_eq!(h.player.spell_damage(&h.catalog.arsenal), 9.0);
        h.player.weapon_index = 1;
        assert_eq!(h.player.weapon_damage(&h.catalog.arsenal), 40.0);

        let snapshot = h.player.snapshot(&h.catalog.arsenal);
        assert_eq!(snapshot.weapon_name, "lance");
        assert_eq!(snapshot.spell_name, "flame");
        assert_eq!(snapshot.health, h.player.stats.health);
        assert_eq!(snapshot.mana.fraction(), h.player.stats.mana.fraction());
    }
}
