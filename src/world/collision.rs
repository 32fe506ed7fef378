//! Axis-separated collision against the static obstacle set.
//!
//! A plain linear scan: levels hold a few thousand obstacles at most.

use bevy::math::Rect;

use crate::core::RectExt;

/// Which axis a movement step travelled along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Pushes `hitbox` out of every obstacle it overlaps along `axis`.
///
/// `sign` is the movement component on that axis; the mover's leading edge
/// snaps to the obstacle's facing edge. A zero sign leaves the hitbox alone.
/// Callers resolve the horizontal axis before the vertical one.
pub fn resolve_axis(hitbox: &mut Rect, axis: Axis, sign: f32, obstacles: &[Rect]) {
    for obstacle in obstacles {
        if !obstacle.overlaps(hitbox) {
            continue;
        }
        match axis {
            Axis::Horizontal => {
                if sign > 0.0 {
                    *hitbox = hitbox.with_right(obstacle.left());
                }
                if sign < 0.0 {
                    *hitbox = hitbox.with_left(obstacle.right());
                }
            }
            Axis::Vertical => {
                if sign > 0.0 {
                    *hitbox = hitbox.with_bottom(obstacle.top());
                }
                if sign < 0.0 {
                    *hitbox = hitbox.with_top(obstacle.bottom());
                }
            }
        }
    }
}
