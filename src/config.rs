//! Game configuration: playfield size, movement tuning and frame pacing.
//!
//! A single `GameConfig` is built at startup and handed to the game loop.
//! Defaults reproduce the classic tuning; an optional `config.json` in the
//! platform config directory can override any field.

use crate::constants::*;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the optional override file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Immutable tuning shared by every session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub car_width: i32,
    pub car_height: i32,
    pub car_bottom_margin: i32,
    /// Car speed when steering, logical pixels per frame.
    pub speed: i32,
    /// Downward obstacle speed, logical pixels per frame.
    pub obstacle_speed: i32,
    pub spawn_chance: f64,
    pub fps: u32,
    pub key_hold_window: Duration,
}

/// Partial configuration as read from `config.json`. Missing fields keep defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub screen_width: Option<i32>,
    pub screen_height: Option<i32>,
    pub car_width: Option<i32>,
    pub car_height: Option<i32>,
    pub car_bottom_margin: Option<i32>,
    pub speed: Option<i32>,
    pub obstacle_speed: Option<i32>,
    pub spawn_chance: Option<f64>,
    pub fps: Option<u32>,
    pub key_hold_window_ms: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_screen(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
    }
}

impl GameConfig {
    /// Default tuning for a playfield of the given size. Car and obstacle
    /// dimensions are derived from the screen.
    pub fn for_screen(screen_width: i32, screen_height: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            car_width: screen_width / CAR_WIDTH_DIVISOR,
            car_height: screen_height / CAR_HEIGHT_DIVISOR,
            car_bottom_margin: CAR_BOTTOM_MARGIN,
            speed: SPEED,
            obstacle_speed: SPEED,
            spawn_chance: SPAWN_CHANCE,
            fps: TARGET_FPS,
            key_hold_window: Duration::from_millis(KEY_HOLD_WINDOW_MS),
        }
    }

    /// Apply overrides on top of the defaults and validate the result.
    pub fn from_overrides(overrides: &ConfigOverrides) -> io::Result<Self> {
        let screen_width = overrides.screen_width.unwrap_or(DEFAULT_SCREEN_WIDTH);
        let screen_height = overrides.screen_height.unwrap_or(DEFAULT_SCREEN_HEIGHT);

        let mut config = Self::for_screen(screen_width, screen_height);
        if let Some(v) = overrides.car_width {
            config.car_width = v;
        }
        if let Some(v) = overrides.car_height {
            config.car_height = v;
        }
        if let Some(v) = overrides.car_bottom_margin {
            config.car_bottom_margin = v;
        }
        if let Some(v) = overrides.speed {
            config.speed = v;
            // Obstacles follow the car speed unless set on their own
            config.obstacle_speed = v;
        }
        if let Some(v) = overrides.obstacle_speed {
            config.obstacle_speed = v;
        }
        if let Some(v) = overrides.spawn_chance {
            config.spawn_chance = v;
        }
        if let Some(v) = overrides.fps {
            config.fps = v;
        }
        if let Some(v) = overrides.key_hold_window_ms {
            config.key_hold_window = Duration::from_millis(v);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON override document.
    pub fn from_json(json: &str) -> io::Result<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Self::from_overrides(&overrides)
    }

    /// Load from `path` if the file exists, otherwise fall back to defaults.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {}", path.display(), e),
            )
        })
    }

    /// Load from the platform config directory.
    pub fn load() -> io::Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values that would break the clamp, spawn or pacing math.
    pub fn validate(&self) -> io::Result<()> {
        let invalid = |msg: String| Err(io::Error::new(io::ErrorKind::InvalidData, msg));

        if self.screen_width <= 0 || self.screen_height <= 0 {
            return invalid(format!(
                "screen must have positive dimensions, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        // Keeps every coordinate sum (pointer halving, clamp, obstacle bottom) inside i32
        if self.screen_width > MAX_SCREEN_DIMENSION || self.screen_height > MAX_SCREEN_DIMENSION {
            return invalid(format!(
                "screen dimensions must not exceed {}, got {}x{}",
                MAX_SCREEN_DIMENSION, self.screen_width, self.screen_height
            ));
        }
        if self.car_width <= 0 || self.car_height <= 0 {
            return invalid(format!(
                "car must have positive dimensions, got {}x{}",
                self.car_width, self.car_height
            ));
        }
        if self.car_bottom_margin < 0 || self.car_bottom_margin > self.screen_height {
            return invalid(format!(
                "car_bottom_margin must be within [0, {}], got {}",
                self.screen_height, self.car_bottom_margin
            ));
        }
        let car_fits_vertically = self
            .car_height
            .checked_add(self.car_bottom_margin)
            .is_some_and(|bottom| bottom <= self.screen_height);
        if self.car_width > self.screen_width || !car_fits_vertically {
            return invalid("car does not fit on the screen".to_string());
        }
        if self.speed <= 0 || self.obstacle_speed <= 0 {
            return invalid("speeds must be positive".to_string());
        }
        if self.speed > self.screen_width || self.obstacle_speed > self.screen_height {
            return invalid(format!(
                "speed must not exceed the screen width and obstacle_speed the screen height, got {} and {}",
                self.speed, self.obstacle_speed
            ));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return invalid(format!(
                "spawn_chance must be within [0, 1], got {}",
                self.spawn_chance
            ));
        }
        if self.fps == 0 {
            return invalid("fps must be positive".to_string());
        }
        Ok(())
    }

    /// Minimum wall-clock time per frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    /// Rightmost legal car x.
    pub fn max_car_x(&self) -> i32 {
        self.screen_width - self.car_width
    }

    /// Car x at the start of every session (centered).
    pub fn car_start_x(&self) -> i32 {
        self.screen_width / 2 - self.car_width / 2
    }

    /// Fixed car y.
    pub fn car_y(&self) -> i32 {
        self.screen_height - self.car_height - self.car_bottom_margin
    }

    /// Obstacles share the car's footprint.
    pub fn obstacle_width(&self) -> i32 {
        self.car_width
    }

    pub fn obstacle_height(&self) -> i32 {
        self.car_height
    }
}

/// Location of the optional `config.json`, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dodge").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
