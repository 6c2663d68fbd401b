//! Sleep-based frame limiter.

use crate::game::io::FrameClock;
use std::thread;
use std::time::{Duration, Instant};

/// Caps the loop at a fixed rate. It never runs faster than `frame`, but
/// it does not catch up when a frame runs long.
#[derive(Debug)]
pub struct SteadyClock {
    frame: Duration,
    last_tick: Option<Instant>,
}

impl SteadyClock {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            last_tick: None,
        }
    }
}

/// Time still to wait when `elapsed` has passed since the previous tick.
pub fn remaining(frame: Duration, elapsed: Duration) -> Duration {
    frame.saturating_sub(elapsed)
}

impl FrameClock for SteadyClock {
    fn wait_for_next_frame(&mut self) {
        if let Some(last) = self.last_tick {
            let wait = remaining(self.frame, last.elapsed());
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }
        self.last_tick = Some(Instant::now());
    }
}
