//! Transient combat objects: weapon hitboxes and particles.

use bevy::math::{Rect, Vec2};

use super::data::WeaponDefinition;
use crate::core::{Animator, AttackKind, EntityId, Facing, RectExt};

/// Offset of the weapon from the player's edge midpoint, across the facing
/// axis.
const HORIZONTAL_GRIP_OFFSET: f32 = 16.0;
const VERTICAL_GRIP_OFFSET: f32 = -10.0;

/// The live weapon hitbox, present from attack trigger until the attack
/// cooldown ends.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackHitbox {
    pub id: EntityId,
    pub kind: AttackKind,
    pub rect: Rect,
    pub weapon: String,
    pub facing: Facing,
}

/// A named one-shot animation. Damaging particles double as magic hitboxes.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: EntityId,
    pub name: String,
    pub rect: Rect,
    pub animator: Animator,
    pub damaging: bool,
}

impl Particle {
    pub fn new(id: EntityId, name: &str, center: Vec2, size: f32, damaging: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            rect: Rect::from_center_size(center, Vec2::splat(size)),
            animator: Animator::default(),
            damaging,
        }
    }

    /// Advances the animation; returns `true` once the last frame has played.
    pub fn advance(&mut self, speed: f32, frame_count: usize) -> bool {
        self.animator.advance(speed, frame_count)
    }

    pub fn animation_key(&self) -> String {
        format!("particles/{}", self.name)
    }
}

/// Places the weapon rect against the side of `player_rect` that `facing`
/// points to.
pub fn weapon_hitbox(player_rect: Rect, facing: Facing, weapon: &WeaponDefinition) -> Rect {
    let size = if facing.is_horizontal() {
        Vec2::new(weapon.reach, weapon.width)
    } else {
        Vec2::new(weapon.width, weapon.reach)
    };
    let center = player_rect.center();
    let half = size / 2.0;

    let weapon_center = match facing {
        Facing::Right => Vec2::new(player_rect.right() + half.x, center.y + HORIZONTAL_GRIP_OFFSET),
        Facing::Left => Vec2::new(player_rect.left() - half.x, center.y + HORIZONTAL_GRIP_OFFSET),
        Facing::Down => Vec2::new(center.x + VERTICAL_GRIP_OFFSET, player_rect.bottom() + half.y),
        Facing::Up => Vec2::new(center.x + VERTICAL_GRIP_OFFSET, player_rect.top() - half.y),
    };
    Rect::from_center_size(weapon_center, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> WeaponDefinition {
        WeaponDefinition {
            name: "sword".into(),
            cooldown: 100,
            damage: 15.0,
            reach: 40.0,
            width: 20.0,
        }
    }

    #[test]
    fn weapon_sits_against_the_facing_edge() {
        let player = Rect::from_top_left(Vec2::ZERO, Vec2::splat(64.0));

        let right = weapon_hitbox(player, Facing::Right, &sword());
        assert_eq!(right.left(), 64.0);
        assert_eq!(right.size(), Vec2::new(40.0, 20.0));
        assert_eq!(right.center().y, 48.0);

        let left = weapon_hitbox(player, Facing::Left, &sword());
        assert_eq!(left.right(), 0.0);

        let down = weapon_hitbox(player, Facing::Down, &sword());
        assert_eq!(down.top(), 64.0);
        assert_eq!(down.size(), Vec2::new(20.0, 40.0));
        assert_eq!(down.center().x, 22.0);

        let up = weapon_hitbox(player, Facing::Up, &sword());
        assert_eq!(up.bottom(), 0.0);
    }

    #[test]
    fn particle_finishes_after_last_frame() {
        let mut particle = Particle::new(EntityId(3), "leaf1", Vec2::new(10.0, 10.0), 64.0, false);
        assert_eq!(particle.rect.center(), Vec2::new(10.0, 10.0));
        let ticks = (1..=100).find(|_| particle.advance(0.5, 2));
        assert_eq!(ticks, Some(4));
    }
}
