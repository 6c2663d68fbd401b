//! Boundary between the game loop and the outside world.
//!
//! The loop only talks to these traits; `crate::platform` and `crate::ui`
//! provide the terminal implementations and tests provide scripted ones.

use super::types::Color;
use std::io;

/// Pointer (mouse or touch) state for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub pressed: bool,
    /// Horizontal position in logical pixels.
    pub x: i32,
}

/// Everything the loop needs to know about input for one frame.
///
/// `left`/`right`/`pointer` are held state. `quit`, `restart`, `close` and
/// `resized` are edge-triggered: true if the signal arrived since the
/// previous sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub quit: bool,
    pub restart: bool,
    /// Application-close request (window close, Ctrl+C).
    pub close: bool,
    /// The output surface changed size; anything static must be redrawn.
    pub resized: bool,
    pub pointer: PointerState,
}

impl InputSnapshot {
    /// Quit key or close signal.
    pub fn wants_exit(&self) -> bool {
        self.quit || self.close
    }
}

/// Source of per-frame input snapshots.
pub trait InputDevice {
    /// Drain pending device events and return the current state. Never blocks.
    fn sample(&mut self) -> io::Result<InputSnapshot>;
}

/// Draw target. Commands accumulate until `present` flips them to the screen.
pub trait RenderSurface {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color);
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);
    /// Rendered size of `text` in logical pixels, used for centering.
    fn text_size(&self, text: &str) -> (i32, i32);
    fn present(&mut self) -> io::Result<()>;
}

/// Fixed-rate pacing.
pub trait FrameClock {
    /// Block until at least one frame period has passed since the previous call.
    fn wait_for_next_frame(&mut self);
}
