//! Enemy state.

use bevy::math::{Rect, Vec2};
use std::sync::Arc;

use super::data::MonsterDefinition;
use crate::core::{Animator, Body, EntityId, GameSettings, RectExt};

/// Behaviour state, re-derived every frame from the distance to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyState {
    #[default]
    Idle,
    Move,
    Attack,
}

impl EnemyState {
    /// Animation folder name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyState::Idle => "idle",
            EnemyState::Move => "move",
            EnemyState::Attack => "attack",
        }
    }
}

/// A monster placed in the level.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub species: Arc<MonsterDefinition>,
    pub state: EnemyState,
    pub health: f32,
    pub vulnerable: bool,
    pub can_attack: bool,
    pub animator: Animator,
    pub alpha: u8,
    pub(crate) hit_time: u64,
    pub(crate) attack_time: u64,
    /// Unit direction away from the last hit, followed while invulnerable.
    pub(crate) knockback: Vec2,
    /// Set once death has been handled.
    pub(crate) dead: bool,
}

impl Enemy {
    pub fn new(
        id: EntityId,
        species: Arc<MonsterDefinition>,
        top_left: Vec2,
        settings: &GameSettings,
    ) -> Self {
        let rect = Rect::from_top_left(top_left, Vec2::splat(settings.tile_size));
        let (inset_x, inset_y) = settings.hitbox_insets.enemy;

        Self {
            id,
            body: Body::new(rect, Vec2::new(inset_x, inset_y)),
            health: species.health,
            species,
            state: EnemyState::Idle,
            vulnerable: true,
            can_attack: true,
            animator: Animator::default(),
            alpha: 255,
            hit_time: 0,
            attack_time: 0,
            knockback: Vec2::ZERO,
            dead: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }
}
