// SPDX-License-Identifier: MIT OR Apache-2.0

//! Piece movement animation
//!
//! A committed move becomes a finite, restartable sequence of fractional
//! board positions. The frame loop pulls one position per tick through
//! [`ActiveAnimation`] so quitting is possible between frames.

use chessview_core::{CommittedMove, Square};

/// Upper bound on frames per square of distance
pub const MAX_FRAMES_PER_SQUARE: u32 = 120;

/// Animation of one committed move
#[derive(Clone, Debug, PartialEq)]
pub struct MoveAnimation {
    /// The move being shown
    pub mv: CommittedMove,
    /// Number of steps; positions are produced for `0..=frame_count`
    pub frame_count: u32,
}

/// One interpolated position of the moving piece
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    pub index: u32,
    /// Fractional row, `from.row()` at the first frame and `to.row()` at the last
    pub row: f32,
    /// Fractional column
    pub col: f32,
    /// Current animation progress (0.0 to 1.0)
    pub progress: f32,
}

impl MoveAnimation {
    /// Frame budget is Manhattan distance times `frames_per_square`
    ///
    /// `frames_per_square` is capped at [`MAX_FRAMES_PER_SQUARE`].
    pub fn new(mv: &CommittedMove, frames_per_square: u32) -> Self {
        let distance = manhattan(mv.from, mv.to);
        Self {
            mv: *mv,
            frame_count: distance * frames_per_square.min(MAX_FRAMES_PER_SQUARE),
        }
    }

    /// Number of positions the sequence yields
    pub fn len(&self) -> usize {
        self.frame_count as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Position at a given frame index, clamped to the last frame
    pub fn frame(&self, index: u32) -> AnimationFrame {
        let index = index.min(self.frame_count);
        let progress = if self.frame_count == 0 {
            1.0
        } else {
            index as f32 / self.frame_count as f32
        };
        AnimationFrame {
            index,
            row: lerp(self.mv.from.row(), self.mv.to.row(), progress),
            col: lerp(self.mv.from.col(), self.mv.to.col(), progress),
            progress,
        }
    }

    /// Fresh iterator over every frame; each call starts from the beginning
    pub fn frames(&self) -> AnimationFrames<'_> {
        AnimationFrames {
            animation: self,
            next: 0,
        }
    }
}

/// Lazy iterator over the frames of a [`MoveAnimation`]
#[derive(Clone, Debug)]
pub struct AnimationFrames<'a> {
    animation: &'a MoveAnimation,
    next: u32,
}

impl Iterator for AnimationFrames<'_> {
    type Item = AnimationFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.animation.frame_count {
            return None;
        }
        let frame = self.animation.frame(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.animation.frame_count + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AnimationFrames<'_> {}

/// An animation being played back one frame per tick
#[derive(Clone, Debug)]
pub struct ActiveAnimation {
    animation: MoveAnimation,
    next: u32,
}

impl ActiveAnimation {
    pub fn start(animation: MoveAnimation) -> Self {
        Self { animation, next: 0 }
    }

    pub fn animation(&self) -> &MoveAnimation {
        &self.animation
    }

    /// Frame to show this tick, `None` once every frame has been shown
    pub fn advance(&mut self) -> Option<AnimationFrame> {
        if self.next > self.animation.frame_count {
            return None;
        }
        let frame = self.animation.frame(self.next);
        self.next += 1;
        Some(frame)
    }

    /// Frame most recently returned by [`advance`](Self::advance)
    pub fn current(&self) -> AnimationFrame {
        self.animation.frame(self.next.saturating_sub(1))
    }

    pub fn is_finished(&self) -> bool {
        self.next > self.animation.frame_count
    }
}

fn manhattan(from: Square, to: Square) -> u32 {
    let rows = (i32::from(from.row()) - i32::from(to.row())).unsigned_abs();
    let cols = (i32::from(from.col()) - i32::from(to.col())).unsigned_abs();
    rows + cols
}

fn lerp(start: u8, end: u8, t: f32) -> f32 {
    let start = f32::from(start);
    start + (f32::from(end) - start) * t
}
