//! Shared motion primitives for everything that moves through the world.
//!
//! Positions are screen-space pixels with y growing downwards, so a rect's
//! `min.y` is its top edge and `max.y` its bottom edge.

use bevy::math::{Rect, Vec2};

use crate::world::collision::{resolve_axis, Axis};

/// Half period of the invulnerability flicker, in milliseconds.
pub const FLICKER_HALF_PERIOD_MS: u64 = 50;

/// Identifier handed out at creation time. Ids grow monotonically, so they
/// also encode creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// Hands out fresh [`EntityId`]s for one level.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// The four directions a sprite can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }

    /// Unit vector pointing the way this facing looks.
    pub fn unit(&self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.0),
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Facing::Left | Facing::Right)
    }
}

/// Edge accessors and pygame-style helpers for [`Rect`].
pub trait RectExt {
    fn from_top_left(top_left: Vec2, size: Vec2) -> Self;
    fn left(&self) -> f32;
    fn right(&self) -> f32;
    fn top(&self) -> f32;
    fn bottom(&self) -> f32;
    /// Strict overlap: rects that only share an edge do not overlap.
    fn overlaps(&self, other: &Rect) -> bool;
    /// Grows (or shrinks, for negative values) by the given total amounts,
    /// keeping the centre fixed.
    fn inflated(&self, dx: f32, dy: f32) -> Self;
    fn translated(&self, offset: Vec2) -> Self;
    fn centered_on(&self, center: Vec2) -> Self;
    fn with_left(&self, x: f32) -> Self;
    fn with_right(&self, x: f32) -> Self;
    fn with_top(&self, y: f32) -> Self;
    fn with_bottom(&self, y: f32) -> Self;
}

impl RectExt for Rect {
    fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Rect::from_corners(top_left, top_left + size)
    }

    fn left(&self) -> f32 {
        self.min.x
    }

    fn right(&self) -> f32 {
        self.max.x
    }

    fn top(&self) -> f32 {
        self.min.y
    }

    fn bottom(&self) -> f32 {
        self.max.y
    }

    fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    fn inflated(&self, dx: f32, dy: f32) -> Self {
        let half = Vec2::new(dx, dy) / 2.0;
        Rect {
            min: self.min - half,
            max: self.max + half,
        }
    }

    fn translated(&self, offset: Vec2) -> Self {
        Rect {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    fn centered_on(&self, center: Vec2) -> Self {
        Rect::from_center_size(center, self.size())
    }

    fn with_left(&self, x: f32) -> Self {
        self.translated(Vec2::new(x - self.min.x, 0.0))
    }

    fn with_right(&self, x: f32) -> Self {
        self.translated(Vec2::new(x - self.max.x, 0.0))
    }

    fn with_top(&self, y: f32) -> Self {
        self.translated(Vec2::new(0.0, y - self.min.y))
    }

    fn with_bottom(&self, y: f32) -> Self {
        self.translated(Vec2::new(0.0, y - self.max.y))
    }
}

/// Position and motion shared by the player and enemies.
///
/// `rect` places the sprite; `hitbox` is the (smaller) box used for
/// collisions. After every [`Body::move_by`] both share the same centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub hitbox: Rect,
    pub direction: Vec2,
}

impl Body {
    /// Creates a body whose hitbox is `rect` inflated by `inset` (negative
    /// values shrink it).
    pub fn new(rect: Rect, inset: Vec2) -> Self {
        Self {
            rect,
            hitbox: rect.inflated(inset.x, inset.y),
            direction: Vec2::ZERO,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Moves the hitbox one axis at a time, resolving obstacle overlaps after
    /// each axis, then re-centres the render rect on the hitbox.
    pub fn move_by(&mut self, speed: f32, obstacles: &[Rect]) {
        if self.direction != Vec2::ZERO {
            self.direction = self.direction.normalize();
        }

        self.hitbox = self
            .hitbox
            .translated(Vec2::new(self.direction.x * speed, 0.0));
        resolve_axis(&mut self.hitbox, Axis::Horizontal, self.direction.x, obstacles);

        self.hitbox = self
            .hitbox
            .translated(Vec2::new(0.0, self.direction.y * speed));
        resolve_axis(&mut self.hitbox, Axis::Vertical, self.direction.y, obstacles);

        self.rect = self.rect.centered_on(self.hitbox.center());
    }

    /// Unit vector from this body's centre to `target`, or zero when they
    /// coincide.
    pub fn direction_to(&self, target: Vec2) -> Vec2 {
        (target - self.center()).normalize_or_zero()
    }

    pub fn distance_to(&self, target: Vec2) -> f32 {
        self.center().distance(target)
    }
}

/// Flicker value used while an entity is invulnerable: 255 or 0, switching
/// every [`FLICKER_HALF_PERIOD_MS`].
pub fn wave_value(now_ms: u64) -> u8 {
    if (now_ms / FLICKER_HALF_PERIOD_MS) % 2 == 0 {
        255
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(
            Rect::from_top_left(Vec2::new(x, y), Vec2::splat(64.0)),
            Vec2::new(0.0, -26.0),
        )
    }

    #[test]
    fn inflate_keeps_center() {
        let rect = Rect::from_top_left(Vec2::ZERO, Vec2::splat(64.0));
        let shrunk = rect.inflated(0.0, -26.0);
        assert_eq!(shrunk.center(), rect.center());
        assert_eq!(shrunk.height(), 38.0);
        assert_eq!(shrunk.width(), 64.0);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::from_top_left(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::from_top_left(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&b.translated(Vec2::new(-0.5, 0.0))));
    }

    #[test]
    fn move_keeps_hitbox_centered_in_rect() {
        let mut body = body_at(0.0, 0.0);
        let obstacle = Rect::from_top_left(Vec2::new(70.0, 0.0), Vec2::splat(64.0));
        for direction in [
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-3.0, 2.0),
            Vec2::ZERO,
        ] {
            body.direction = direction;
            body.move_by(5.0, &[obstacle]);
            assert_eq!(body.hitbox.center(), body.rect.center());
        }
    }

    #[test]
    fn direction_is_normalized_unless_zero() {
        let mut body = body_at(0.0, 0.0);
        body.direction = Vec2::new(3.0, 4.0);
        body.move_by(0.0, &[]);
        assert!((body.direction.length() - 1.0).abs() < 1e-6);

        body.direction = Vec2::ZERO;
        body.move_by(5.0, &[]);
        assert_eq!(body.direction, Vec2::ZERO);
        assert_eq!(body.hitbox.center(), body.rect.center());
    }

    #[test]
    fn diagonal_move_scales_by_speed() {
        let mut body = body_at(0.0, 0.0);
        let start = body.hitbox.center();
        body.direction = Vec2::new(1.0, 1.0);
        body.move_by(5.0, &[]);
        let travelled = body.hitbox.center().distance(start);
        assert!((travelled - 5.0).abs() < 1e-4);
    }

    #[test]
    fn wave_alternates_every_half_period() {
        assert_eq!(wave_value(0), 255);
        assert_eq!(wave_value(FLICKER_HALF_PERIOD_MS - 1), 255);
        assert_eq!(wave_value(FLICKER_HALF_PERIOD_MS), 0);
        assert_eq!(wave_value(FLICKER_HALF_PERIOD_MS * 2), 255);
    }
}
