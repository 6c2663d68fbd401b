//! Dodge - terminal arcade game library.
//!
//! The game loop and its collaborators are exposed for testing; the
//! binary wires them to the process terminal.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod game;
pub mod logging;
pub mod platform;
pub mod ui;

pub use config::GameConfig;
pub use game::{GameLoop, GameSession, LoopState};
