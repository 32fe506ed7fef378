//! Player state: status, stats, and the read-only HUD projection.

use bevy::math::{Rect, Vec2};

use crate::core::{Animator, Body, EntityId, Facing, GameSettings, RectExt};

/// What the player is doing, independent of facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Activity {
    #[default]
    Idle,
    Walking,
    Attacking,
}

/// Facing × activity; selects the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status {
    pub facing: Facing,
    pub activity: Activity,
}

impl Status {
    /// Animation folder name, e.g. `down`, `left_idle`, `up_attack`.
    pub fn animation_key(&self) -> String {
        let facing = self.facing.as_str();
        match self.activity {
            Activity::Walking => facing.to_string(),
            Activity::Idle => format!("{facing}_idle"),
            Activity::Attacking => format!("{facing}_attack"),
        }
    }
}

/// A stat with a current value bounded by a maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    pub current: f32,
    pub max: f32,
}

impl Stat {
    pub fn full(value: f32) -> Self {
        Self {
            current: value,
            max: value,
        }
    }

    /// Adds `amount` (may be negative), keeping the value in `0..=max`.
    pub fn add(&mut self, amount: f32) {
        self.current = (self.current + amount).clamp(0.0, self.max);
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Share of the maximum, in `0..=1`.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }
}

/// Player's core statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBlock {
    pub health: Stat,
    pub mana: Stat,
    pub attack: Stat,
    pub magic: Stat,
    pub speed: Stat,
}

/// Logical keys held during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub cast: bool,
    pub switch_weapon: bool,
    pub switch_spell: bool,
}

/// Read-only view of the player for the HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub health: Stat,
    pub mana: Stat,
    pub exp: u32,
    pub weapon_index: usize,
    pub weapon_name: String,
    pub spell_index: usize,
    pub spell_name: String,
    pub can_switch_weapon: bool,
    pub can_switch_spell: bool,
}

/// The player-controlled entity.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub status: Status,
    pub stats: StatBlock,
    pub exp: u32,
    pub weapon_index: usize,
    pub spell_index: usize,
    pub attacking: bool,
    pub vulnerable: bool,
    pub can_switch_weapon: bool,
    pub can_switch_spell: bool,
    pub animator: Animator,
    /// Sprite opacity; flickers while invulnerable.
    pub alpha: u8,
    pub(crate) attack_time: u64,
    pub(crate) weapon_switch_time: u64,
    pub(crate) spell_switch_time: u64,
    pub(crate) hurt_time: u64,
}

impl Player {
    /// Spawns the player with its sprite's top-left corner at `top_left`.
    pub fn new(id: EntityId, top_left: Vec2, settings: &GameSettings) -> Self {
        let rect = Rect::from_top_left(top_left, Vec2::splat(settings.tile_size));
        let (inset_x, inset_y) = settings.hitbox_insets.player;
        let base = &settings.player;

        Self {
            id,
            body: Body::new(rect, Vec2::new(inset_x, inset_y)),
            status: Status::default(),
            stats: StatBlock {
                health: Stat::full(base.health),
                mana: Stat::full(base.mana),
                attack: Stat::full(base.attack),
                magic: Stat::full(base.magic),
                speed: Stat::full(base.speed),
            },
            exp: base.starting_exp,
            weapon_index: 0,
            spell_index: 0,
            attacking: false,
            vulnerable: true,
            can_switch_weapon: true,
            can_switch_spell: true,
            animator: Animator::default(),
            alpha: 255,
            attack_time: 0,
            weapon_switch_time: 0,
            spell_switch_time: 0,
            hurt_time: 0,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.stats.health.current <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_fraction_is_bounded() {
        let mut mana = Stat::full(60.0);
        mana.add(-45.0);
        assert_eq!(mana.fraction(), 0.25);
        assert_eq!(Stat::full(0.0).fraction(), 0.0);
        let over = Stat {
            current: 150.0,
            max: 100.0,
        };
        assert_eq!(over.fraction(), 1.0);
    }

    #[test]
    fn animation_keys_follow_activity() {
        let mut status = Status {
            facing: Facing::Left,
            activity: Activity::Walking,
        };
        assert_eq!(status.animation_key(), "left");
        status.activity = Activity::Idle;
        assert_eq!(status.animation_key(), "left_idle");
        status.activity = Activity::Attacking;
        assert_eq!(status.animation_key(), "left_attack");
    }

    #[test]
    fn stat_is_clamped_both_ways() {
        let mut stat = Stat::full(100.0);
        stat.add(25.0);
        assert_eq!(stat.current, 100.0);
        stat.add(-130.0);
        assert_eq!(stat.current, 0.0);
    }

    #[test]
    fn new_player_hitbox_is_inset() {
        let settings = GameSettings::default();
        let player = Player::new(EntityId(0), Vec2::ZERO, &settings);
        assert_eq!(player.body.hitbox.height(), 38.0);
        assert_eq!(player.body.hitbox.width(), 58.0);
        assert_eq!(player.body.hitbox.center(), player.body.rect.center());
        assert_eq!(player.stats.health.current, 100.0);
    }
}
