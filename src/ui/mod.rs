//! Terminal rendering.

pub mod terminal_surface;

pub use terminal_surface::TerminalSurface;
