//! Sky Hopper - A vertical-scrolling platform jumper
//!
//! Core modules:
//! - `sim`: Level simulation (player, platforms, spawner, speed progression)
//! - `modes`: Splash / Gameplay / EndGame state machine
//! - `controller`: Owns the active mode and the persistent session payload
//! - `persistence`: High score storage
//! - `config`: Data-driven game constants
//! - `backgrounds`: Per-level background handles
//! - `input`: Key codes, bindings and input events

pub mod backgrounds;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod modes;
pub mod persistence;
pub mod sim;

pub use config::GameConfig;
pub use controller::Game;
pub use error::ConfigError;

/// Default configuration constants
pub mod consts {
    /// Edge length of one tile in pixels
    pub const TILE_SIZE: f32 = 32.0;
    /// Window dimensions, in tiles
    pub const WINDOW_WIDTH_IN_TILES: u32 = 12;
    pub const WINDOW_HEIGHT_IN_TILES: u32 = 20;
    /// Frames (simulation ticks) per second
    pub const FPS: u32 = 60;

    /// Player defaults (per-tick units)
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_JUMP_IMPULSE: f32 = -20.0;
    pub const PLAYER_GRAVITY: f32 = 0.8;

    /// Platform speed at the start of a run (pixels per tick)
    pub const START_PLATFORM_SPEED: f32 = 1.0;
    /// Speed never increases past this
    pub const MAX_PLATFORM_SPEED: f32 = 5.0;
    /// Floor for the starting speed of a follow-up level
    pub const MIN_PLATFORM_SPEED: f32 = 1.0;
    /// Speed bump applied once per speed interval
    pub const PLATFORM_SPEED_STEP: f32 = 0.5;
    /// Score interval between speed bumps
    pub const NUM_OF_PLATFORMS_BEFORE_SPEED_INCREASE: u64 = 5;
    /// Score interval between exit platforms
    pub const EXIT_AMOUNT: u64 = 20;

    /// Valid platform widths, in tiles
    pub const PLATFORM_WIDTHS: [u32; 4] = [2, 3, 4, 5];
    /// Exit platforms always use the widest sprite
    pub const EXIT_PLATFORM_WIDTH: u32 = 5;
    /// Number of platforms laid out at level start
    pub const INITIAL_PLATFORMS: u32 = 3;
    /// Width of each initial platform, in tiles
    pub const INITIAL_PLATFORM_WIDTH: u32 = 4;
    /// Column of the first initial platform; each next one is one tile further right
    pub const INITIAL_PLATFORM_X: u32 = 3;
    /// Row gap between initial platforms, in tiles
    pub const INITIAL_PLATFORM_ROW_GAP: u32 = 3;
}
