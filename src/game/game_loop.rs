//! The per-frame state machine: Playing, GameOver, Terminated.
//!
//! ```text
//!            collision              restart
//!  Playing ────────────> GameOver ──────────> Playing (new session)
//!     │                     │
//!     └── quit / close ─────┴──────────────> Terminated
//! ```
//!
//! `GameLoop::step` runs exactly one frame and is the single dispatch
//! point; `GameLoop::run` repeats it until Terminated.

use super::draw::{draw_game_over, draw_playing};
use super::io::{FrameClock, InputDevice, RenderSurface};
use super::logic::{step_frame, FrameOutcome};
use super::types::GameSession;
use crate::config::GameConfig;
use log::{debug, info};
use rand::Rng;
use std::io;

/// Top-level loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Playing,
    GameOver,
    Terminated,
}

/// Owns the session and drives it one frame at a time.
pub struct GameLoop<R: Rng> {
    config: GameConfig,
    session: GameSession,
    state: LoopState,
    rng: R,
    sessions_played: u32,
}

impl<R: Rng> GameLoop<R> {
    /// Start in Playing with a fresh session.
    pub fn new(config: GameConfig, rng: R) -> Self {
        let session = GameSession::new(&config);
        info!(
            "New session (screen {}x{}, car {}x{})",
            config.screen_width, config.screen_height, config.car_width, config.car_height
        );
        Self {
            config,
            session,
            state: LoopState::Playing,
            rng,
            sessions_played: 1,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of sessions started, including the current one.
    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    /// Replace the session with a fresh one and resume playing.
    pub fn restart(&mut self) {
        self.session = GameSession::new(&self.config);
        self.state = LoopState::Playing;
        self.sessions_played += 1;
        info!("Restarted, session #{}", self.sessions_played);
    }

    /// Run one frame: sample input, dispatch on the current state, render,
    /// then wait for the next tick. Returns the state after the frame.
    pub fn step<I, S, C>(
        &mut self,
        input: &mut I,
        surface: &mut S,
        clock: &mut C,
    ) -> io::Result<LoopState>
    where
        I: InputDevice,
        S: RenderSurface,
        C: FrameClock,
    {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        let snapshot = input.sample()?;
        if snapshot.wants_exit() {
            info!(
                "Quit requested ({}), score {}",
                if snapshot.close { "close signal" } else { "quit key" },
                self.session.score
            );
            self.state = LoopState::Terminated;
            return Ok(self.state);
        }

        match self.state {
            LoopState::Playing => {
                match step_frame(&mut self.session, &snapshot, &self.config, &mut self.rng) {
                    FrameOutcome::Survived => {
                        draw_playing(surface, &self.session)?;
                    }
                    FrameOutcome::Collided => {
                        info!("Game over, final score {}", self.session.score);
                        self.state = LoopState::GameOver;
                        // Drawn once on entry, the screen stays up while waiting
                        draw_game_over(surface, &self.config, self.session.score)?;
                    }
                }
            }
            LoopState::GameOver => {
                if snapshot.restart {
                    self.restart();
                } else if snapshot.resized {
                    debug!("Surface resized, redrawing game over screen");
                    draw_game_over(surface, &self.config, self.session.score)?;
                }
            }
            LoopState::Terminated => return Ok(self.state),
        }

        clock.wait_for_next_frame();
        Ok(self.state)
    }

    /// Step until Terminated. Collaborator errors end the loop immediately.
    pub fn run<I, S, C>(
        &mut self,
        input: &mut I,
        surface: &mut S,
        clock: &mut C,
    ) -> io::Result<()>
    where
        I: InputDevice,
        S: RenderSurface,
        C: FrameClock,
    {
        while self.step(input, surface, clock)? != LoopState::Terminated {}
        debug!("Loop finished after {} session(s)", self.sessions_played);
        Ok(())
    }
}
