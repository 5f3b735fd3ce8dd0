use std::time::{Duration, Instant};

use crate::foundation::core::FrameIndex;

/// What happens when the cursor reaches the final frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    /// Wrap back to frame 0 and keep going.
    Loop,
    /// Stop after one pass.
    Once,
}

/// Animation cursor over `0..=len`.
///
/// Frame `f` reveals the first `f` points, so one pass over `len` points visits `len + 1`
/// frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationState {
    frame: u64,
    len: u64,
    playback: Playback,
}

impl AnimationState {
    /// Cursor at frame 0 for a trajectory of `len` points.
    pub fn new(len: usize, playback: Playback) -> Self {
        Self {
            frame: 0,
            len: len as u64,
            playback,
        }
    }

    /// Frame to draw now.
    pub fn current(&self) -> FrameIndex {
        FrameIndex(self.frame)
    }

    /// Final frame index (`N`).
    pub fn last(&self) -> FrameIndex {
        FrameIndex(self.len)
    }

    /// Distinct frames in one pass (`N + 1`).
    pub fn frames_per_pass(&self) -> u64 {
        self.len + 1
    }

    /// Move to the next frame.
    ///
    /// Returns `false` (and leaves the cursor at `N`) once a [`Playback::Once`] pass is
    /// complete. [`Playback::Loop`] wraps from `N` to 0 and always returns `true`.
    pub fn advance(&mut self) -> bool {
        if self.frame < self.len {
            self.frame += 1;
            return true;
        }
        match self.playback {
            Playback::Loop => {
                self.frame = 0;
                true
            }
            Playback::Once => false,
        }
    }

    /// Restart at frame 0.
    pub fn reset(&mut self) {
        self.frame = 0;
    }
}

/// Fixed-interval driver for an [`AnimationState`].
///
/// The owner polls it with the current time; each elapsed interval advances the cursor by exactly
/// one frame, so a late poll never skips frames.
#[derive(Clone, Copy, Debug)]
pub struct FrameTicker {
    state: AnimationState,
    interval: Duration,
    next_tick: Instant,
}

impl FrameTicker {
    /// Start ticking from `now`; the first advance is due one interval later.
    pub fn new(state: AnimationState, interval: Duration, now: Instant) -> Self {
        Self {
            state,
            interval,
            next_tick: now + interval,
        }
    }

    /// Current cursor.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Instant of the next due advance.
    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// Advance once if the next tick is due. Returns `true` when the frame changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        // Ticks missed while the loop was stalled are dropped, not replayed.
        self.next_tick = now + self.interval;
        self.state.advance()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
