//! Dodge: steer the car, avoid the falling blocks.

pub mod draw;
pub mod game_loop;
pub mod io;
pub mod logic;
pub mod types;

pub use game_loop::{GameLoop, LoopState};
pub use io::{FrameClock, InputDevice, InputSnapshot, PointerState, RenderSurface};
pub use types::{Car, Color, GameSession, Obstacle, Rect};
