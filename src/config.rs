//! Game configuration
//!
//! A single immutable struct built once at startup and passed by reference to
//! everything that needs world constants. Optionally loaded from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::input::KeyBindings;

/// World, physics and progression constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    /// Tile edge in pixels
    pub tile_size: f32,
    pub window_width_in_tiles: u32,
    pub window_height_in_tiles: u32,
    /// Ticks per second
    pub fps: u32,

    // === Player ===
    /// Player sprite size in tiles (width, height)
    pub player_size_tiles: (f32, f32),
    pub player_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,

    // === Platforms ===
    pub start_platform_speed: f32,
    pub max_platform_speed: f32,
    pub speed_step: f32,
    /// Score interval between speed bumps
    pub speed_interval: u64,
    /// Score interval between exit platforms
    pub exit_amount: u64,

    // === Input ===
    pub bindings: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            window_width_in_tiles: WINDOW_WIDTH_IN_TILES,
            window_height_in_tiles: WINDOW_HEIGHT_IN_TILES,
            fps: FPS,

            player_size_tiles: (1.0, 1.0),
            player_speed: PLAYER_SPEED,
            jump_impulse: PLAYER_JUMP_IMPULSE,
            gravity: PLAYER_GRAVITY,

            start_platform_speed: START_PLATFORM_SPEED,
            max_platform_speed: MAX_PLATFORM_SPEED,
            speed_step: PLATFORM_SPEED_STEP,
            speed_interval: NUM_OF_PLATFORMS_BEFORE_SPEED_INCREASE,
            exit_amount: EXIT_AMOUNT,

            bindings: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    /// Window width in pixels
    #[inline]
    pub fn window_width(&self) -> f32 {
        self.window_width_in_tiles as f32 * self.tile_size
    }

    /// Window height in pixels
    #[inline]
    pub fn window_height(&self) -> f32 {
        self.window_height_in_tiles as f32 * self.tile_size
    }

    /// Player sprite size in pixels
    pub fn player_size(&self) -> (f32, f32) {
        (
            self.player_size_tiles.0 * self.tile_size,
            self.player_size_tiles.1 * self.tile_size,
        )
    }

    /// Fixed timestep derived from the frame rate
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width_in_tiles == 0 {
            return Err(ConfigError::ZeroWindowDimension {
                field: "window_width_in_tiles",
            });
        }
        if self.window_height_in_tiles == 0 {
            return Err(ConfigError::ZeroWindowDimension {
                field: "window_height_in_tiles",
            });
        }

        let positives = [
            ("tile_size", self.tile_size),
            ("fps", self.fps as f32),
            ("player_width", self.player_size_tiles.0),
            ("player_height", self.player_size_tiles.1),
            ("start_platform_speed", self.start_platform_speed),
            ("max_platform_speed", self.max_platform_speed),
            ("speed_step", self.speed_step),
        ];
        for (field, value) in positives {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.speed_interval == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "speed_interval",
            });
        }
        if self.exit_amount == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "exit_amount",
            });
        }

        let widest = PLATFORM_WIDTHS
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .max(EXIT_PLATFORM_WIDTH);
        if widest > self.window_width_in_tiles {
            return Err(ConfigError::PlatformWiderThanWindow {
                width_tiles: widest,
                window_tiles: self.window_width_in_tiles,
            });
        }

        // Initial staircase must fit too
        let initial_span =
            INITIAL_PLATFORM_X + (INITIAL_PLATFORMS - 1) + INITIAL_PLATFORM_WIDTH;
        if initial_span > self.window_width_in_tiles {
            return Err(ConfigError::PlatformWiderThanWindow {
                width_tiles: initial_span,
                window_tiles: self.window_width_in_tiles,
            });
        }

        let (player_width, _) = self.player_size();
        if player_width > self.window_width() {
            return Err(ConfigError::PlayerWiderThanWindow {
                player_width,
                window_width: self.window_width(),
            });
        }

        if self.max_platform_speed < self.start_platform_speed {
            return Err(ConfigError::MaxSpeedBelowStart {
                start: self.start_platform_speed,
                max: self.max_platform_speed,
            });
        }

        Ok(())
    }

    /// Load from a JSON file, falling back to defaults when the file is
    /// missing or unparseable. Validation is left to the caller.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<GameConfig>(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
