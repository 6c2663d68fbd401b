//! Crossterm-backed input device.
//!
//! Terminals deliver key events, not key state. `InputTracker` folds the
//! event stream into the held/edge snapshot the game loop expects. When the
//! terminal reports key releases the held state is exact; otherwise a key
//! counts as held for `hold_window` after its last press or repeat.

use crate::config::GameConfig;
use crate::game::io::{InputDevice, InputSnapshot, PointerState};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::io;
use std::time::{Duration, Instant};

/// Held state of one directional key.
#[derive(Debug, Clone, Copy, Default)]
struct KeyHold {
    down: bool,
    last_seen: Option<Instant>,
}

impl KeyHold {
    fn press(&mut self, now: Instant) {
        self.down = true;
        self.last_seen = Some(now);
    }

    fn release(&mut self) {
        self.down = false;
        self.last_seen = None;
    }

    fn is_held(&self, now: Instant, reports_release: bool, hold_window: Duration) -> bool {
        if !self.down {
            return false;
        }
        if reports_release {
            return true;
        }
        self.last_seen
            .map(|seen| now.saturating_duration_since(seen) < hold_window)
            .unwrap_or(false)
    }
}

/// Game action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Quit,
    Restart,
    Close,
}

/// Key bindings: arrows or A/D steer, R restarts, Q/Esc quit, Ctrl+C closes.
pub fn map_key(key: &KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(KeyAction::Close);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(KeyAction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(KeyAction::Right),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Restart),
        _ => None,
    }
}

/// Folds terminal events into per-frame snapshots.
#[derive(Debug, Clone)]
pub struct InputTracker {
    screen_width: i32,
    hold_window: Duration,
    reports_release: bool,
    columns: u16,
    left: KeyHold,
    right: KeyHold,
    pointer: PointerState,
    quit: bool,
    restart: bool,
    close: bool,
    resized: bool,
}

impl InputTracker {
    pub fn new(config: &GameConfig, columns: u16, reports_release: bool) -> Self {
        Self {
            screen_width: config.screen_width,
            hold_window: config.key_hold_window,
            reports_release,
            columns,
            left: KeyHold::default(),
            right: KeyHold::default(),
            pointer: PointerState::default(),
            quit: false,
            restart: false,
            close: false,
            resized: false,
        }
    }

    /// Logical x at the center of terminal column `column`.
    pub fn column_to_x(&self, column: u16) -> i32 {
        let columns = self.columns.max(1) as i64;
        ((2 * column as i64 + 1) * self.screen_width as i64 / (2 * columns)) as i32
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, _) => {
                self.columns = *columns;
                self.resized = true;
            }
            Event::FocusLost => {
                // Release events never arrive for keys let go while unfocused
                self.left.release();
                self.right.release();
                self.pointer.pressed = false;
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        let Some(action) = map_key(key) else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => match action {
                KeyAction::Left => self.left.press(now),
                KeyAction::Right => self.right.press(now),
                KeyAction::Quit if key.kind == KeyEventKind::Press => self.quit = true,
                KeyAction::Restart if key.kind == KeyEventKind::Press => self.restart = true,
                KeyAction::Close => self.close = true,
                _ => {}
            },
            KeyEventKind::Release => match action {
                KeyAction::Left => self.left.release(),
                KeyAction::Right => self.right.release(),
                _ => {}
            },
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                self.pointer = PointerState {
                    pressed: true,
                    x: self.column_to_x(mouse.column),
                };
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.pointer.pressed = false;
                self.pointer.x = self.column_to_x(mouse.column);
            }
            _ => {}
        }
    }

    /// Current state. Edge-triggered signals are consumed.
    pub fn snapshot(&mut self, now: Instant) -> InputSnapshot {
        let snapshot = InputSnapshot {
            left: self.left.is_held(now, self.reports_release, self.hold_window),
            right: self.right.is_held(now, self.reports_release, self.hold_window),
            quit: self.quit,
            restart: self.restart,
            close: self.close,
            resized: self.resized,
            pointer: self.pointer,
        };
        self.quit = false;
        self.restart = false;
        self.close = false;
        self.resized = false;
        snapshot
    }
}

/// `InputDevice` reading the process terminal through crossterm.
pub struct TerminalInput {
    tracker: InputTracker,
}

impl TerminalInput {
    pub fn new(config: &GameConfig, columns: u16, reports_release: bool) -> Self {
        Self {
            tracker: InputTracker::new(config, columns, reports_release),
        }
    }
}

impl InputDevice for TerminalInput {
    fn sample(&mut self) -> io::Result<InputSnapshot> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.tracker.handle_event(&event, Instant::now());
        }
        Ok(self.tracker.snapshot(Instant::now()))
    }
}
