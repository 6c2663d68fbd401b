//! Dodge data structures.
//!
//! A car slides along the bottom of the screen while blocks fall from the
//! top. All coordinates are logical pixels with the origin at the top-left.

use crate::config::GameConfig;
use rand::Rng;

/// Solid draw color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        other.x < self.x + self.width
            && other.x + other.width > self.x
            && other.y < self.y + self.height
            && other.y + other.height > self.y
    }
}

/// The player's car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Horizontal velocity applied on the last frame.
    pub velocity: i32,
}

impl Car {
    /// Centered car resting above the bottom margin.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.car_start_x(),
            y: config.car_y(),
            width: config.car_width,
            height: config.car_height,
            velocity: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A falling block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Obstacle {
    pub fn new(x: i32, y: i32, config: &GameConfig) -> Self {
        Self {
            x,
            y,
            width: config.obstacle_width(),
            height: config.obstacle_height(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// One play-through, from reset to game over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub car: Car,
    /// Active obstacles in spawn order.
    pub obstacles: Vec<Obstacle>,
    /// Frames survived.
    pub score: u64,
    pub game_over: bool,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            car: Car::new(config),
            obstacles: Vec::new(),
            score: 0,
            game_over: false,
        }
    }

    /// Push a new obstacle just above the top edge at a random column.
    pub fn spawn_obstacle<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        let max_x = config.screen_width - config.obstacle_width();
        let x = rng.gen_range(0..=max_x);
        self.obstacles
            .push(Obstacle::new(x, -config.obstacle_height(), config));
    }
}
