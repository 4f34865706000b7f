//! Tick-driven frame cycling for sprite animation.
//!
//! A [`FrameCycle`] holds a counter that advances once per fixed step and maps
//! to a frame index, so animation speed is tied to the simulation rate rather
//! than wall-clock time.

/// Looping frame counter: `frame_count` frames, each shown for `ticks_per_frame` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCycle {
    frame_count: u32,
    ticks_per_frame: u32,
    counter: u32,
}

impl FrameCycle {
    /// Both arguments are clamped to at least 1.
    pub fn new(frame_count: u32, ticks_per_frame: u32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            ticks_per_frame: ticks_per_frame.max(1),
            counter: 0,
        }
    }

    /// Step the counter and return the frame it now points to.
    /// The counter wraps to 0 once it reaches `frame_count * ticks_per_frame`.
    pub fn advance(&mut self) -> u32 {
        self.counter += 1;
        if self.counter >= self.period() {
            self.counter = 0;
        }
        self.frame()
    }

    pub fn frame(&self) -> u32 {
        self.counter / self.ticks_per_frame
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Ticks in one full loop.
    pub fn period(&self) -> u32 {
        self.frame_count * self.ticks_per_frame
    }
}
