//! Draw requests issued to the render surface each frame.

use super::io::RenderSurface;
use super::types::{Color, GameSession};
use crate::config::GameConfig;
use crate::constants::{
    GAME_OVER_TEXT_OFFSET, RESTART_PROMPT, SCORE_TEXT_X, SCORE_TEXT_Y,
};
use std::io;

pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

pub fn game_over_text(score: u64) -> String {
    format!("You lose! Final Score: {}", score)
}

/// Playing frame: background, car, obstacles, score.
pub fn draw_playing<S: RenderSurface>(surface: &mut S, session: &GameSession) -> io::Result<()> {
    surface.clear(Color::WHITE);

    let car = &session.car;
    surface.draw_rect(car.x, car.y, car.width, car.height, Color::RED);

    for obstacle in &session.obstacles {
        surface.draw_rect(
            obstacle.x,
            obstacle.y,
            obstacle.width,
            obstacle.height,
            Color::BLUE,
        );
    }

    surface.draw_text(
        SCORE_TEXT_X,
        SCORE_TEXT_Y,
        &score_text(session.score),
        Color::BLACK,
    );
    surface.present()
}

/// Game-over screen: final score and the restart prompt, centered.
pub fn draw_game_over<S: RenderSurface>(
    surface: &mut S,
    config: &GameConfig,
    score: u64,
) -> io::Result<()> {
    surface.clear(Color::WHITE);

    let center_x = config.screen_width / 2;
    let center_y = config.screen_height / 2;

    let headline = game_over_text(score);
    let (w, h) = surface.text_size(&headline);
    surface.draw_text(
        center_x - w / 2,
        center_y - h / 2 - GAME_OVER_TEXT_OFFSET,
        &headline,
        Color::BLACK,
    );

    let (w, _) = surface.text_size(RESTART_PROMPT);
    surface.draw_text(
        center_x - w / 2,
        center_y + GAME_OVER_TEXT_OFFSET,
        RESTART_PROMPT,
        Color::BLACK,
    );

    surface.present()
}
