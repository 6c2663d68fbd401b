//! Terminal platform glue: input device, frame clock, terminal lifecycle.

pub mod clock;
pub mod input;
pub mod terminal;

pub use clock::SteadyClock;
pub use input::{InputTracker, TerminalInput};
pub use terminal::TerminalGuard;
