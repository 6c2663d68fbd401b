//! Terminal setup and teardown.

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Raw-mode alternate screen with mouse capture. Restored on drop, so the
/// shell gets its terminal back even when the game loop returns an error.
pub struct TerminalGuard {
    key_release_reporting: bool,
    restored: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<(Self, Terminal<CrosstermBackend<Stdout>>)> {
        enable_raw_mode()?;
        // From here on a failed step drops the guard, which undoes the partial setup
        let mut guard = Self {
            key_release_reporting: false,
            restored: false,
        };
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        stdout.execute(EnableFocusChange)?;
        stdout.execute(Hide)?;

        // Release events give exact held-key state where the terminal supports them
        match supports_keyboard_enhancement() {
            Ok(true) => {
                stdout.execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))?;
                guard.key_release_reporting = true;
            }
            Ok(false) => {}
            Err(e) => warn!("Keyboard enhancement query failed: {}", e),
        }
        info!("Key release reporting: {}", guard.key_release_reporting);

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok((guard, terminal))
    }

    pub fn key_release_reporting(&self) -> bool {
        self.key_release_reporting
    }

    /// Undo everything `enter` did. Every step runs even if an earlier one
    /// fails; the first failure is returned. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let mut stdout = io::stdout();
        let pop_flags = self.key_release_reporting;
        first_error([
            if pop_flags {
                stdout.execute(PopKeyboardEnhancementFlags).map(|_| ())
            } else {
                Ok(())
            },
            stdout.execute(Show).map(|_| ()),
            stdout.execute(DisableFocusChange).map(|_| ()),
            stdout.execute(DisableMouseCapture).map(|_| ()),
            stdout.execute(LeaveAlternateScreen).map(|_| ()),
            disable_raw_mode(),
        ])
    }
}

/// Drive every step to completion and keep the first error.
fn first_error<I>(steps: I) -> io::Result<()>
where
    I: IntoIterator<Item = io::Result<()>>,
{
    steps
        .into_iter()
        .fold(Ok(()), |first, step| first.and(step))
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}
