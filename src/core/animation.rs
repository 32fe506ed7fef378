//! Frame cursor for sprite animations.

/// Fractional frame cursor advanced once per simulation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Animator {
    frame: f32,
}

impl Animator {
    /// Advances by `speed` frames. Returns `true` when the cursor ran past the
    /// last frame and wrapped back to the first.
    pub fn advance(&mut self, speed: f32, frame_count: usize) -> bool {
        self.frame += speed;
        if self.frame >= frame_count.max(1) as f32 {
            self.frame = 0.0;
            true
        } else {
            false
        }
    }

    pub fn frame(&self) -> usize {
        self.frame as usize
    }

    pub fn reset(&mut self) {
        self.frame = 0.0;
    }
}
