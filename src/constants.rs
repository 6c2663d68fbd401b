// Playfield defaults (logical pixels)
pub const DEFAULT_SCREEN_WIDTH: i32 = 800;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 600;
pub const MAX_SCREEN_DIMENSION: i32 = 1 << 20;

// Car and obstacles share these fractions of the screen
pub const CAR_WIDTH_DIVISOR: i32 = 10;
pub const CAR_HEIGHT_DIVISOR: i32 = 6;
pub const CAR_BOTTOM_MARGIN: i32 = 20;

// Movement in logical pixels per frame
pub const SPEED: i32 = 20;

// Per-frame Bernoulli chance of a new obstacle
pub const SPAWN_CHANCE: f64 = 0.02;

// Frame pacing
pub const TARGET_FPS: u32 = 60;

// Without key release reporting a key stays held this long after its last press/repeat
pub const KEY_HOLD_WINDOW_MS: u64 = 150;

// HUD placement
pub const SCORE_TEXT_X: i32 = 10;
pub const SCORE_TEXT_Y: i32 = 10;
pub const GAME_OVER_TEXT_OFFSET: i32 = 30;

pub const RESTART_PROMPT: &str = "Press R to Restart or Q to Quit";
