//! Error types
//!
//! Only configuration problems surface as errors. Storage failures are
//! converted to defaults at the persistence boundary, and simulation
//! invariants are checked with debug assertions.

use std::fmt;

/// Invalid configuration detected when building a game or level
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A window dimension (in tiles) is zero
    ZeroWindowDimension { field: &'static str },
    /// A value that must be strictly positive is not
    NonPositive { field: &'static str, value: f32 },
    /// An interval used as a modulus is zero
    ZeroInterval { field: &'static str },
    /// The widest platform does not fit in the window
    PlatformWiderThanWindow { width_tiles: u32, window_tiles: u32 },
    /// The player sprite is wider than the window
    PlayerWiderThanWindow { player_width: f32, window_width: f32 },
    /// Maximum platform speed is below the starting speed
    MaxSpeedBelowStart { start: f32, max: f32 },
    /// The background source has nothing to cycle through
    NoBackgrounds,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroWindowDimension { field } => {
                write!(f, "window dimension `{}` must be at least one tile", field)
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "`{}` must be positive (got {})", field, value)
            }
            ConfigError::ZeroInterval { field } => {
                write!(f, "interval `{}` must be non-zero", field)
            }
            ConfigError::PlatformWiderThanWindow {
                width_tiles,
                window_tiles,
            } => write!(
                f,
                "platform width {} tiles exceeds window width {} tiles",
                width_tiles, window_tiles
            ),
            ConfigError::PlayerWiderThanWindow {
                player_width,
                window_width,
            } => write!(
                f,
                "player width {}px exceeds window width {}px",
                player_width, window_width
            ),
            ConfigError::MaxSpeedBelowStart { start, max } => write!(
                f,
                "max platform speed {} is below start speed {}",
                max, start
            ),
            ConfigError::NoBackgrounds => write!(f, "no backgrounds available"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = ConfigError::ZeroInterval {
            field: "exit_amount",
        };
        assert!(err.to_string().contains("exit_amount"));

        let err = ConfigError::PlatformWiderThanWindow {
            width_tiles: 5,
            window_tiles: 4,
        };
        assert_eq!(
            err.to_string(),
            "platform width 5 tiles exceeds window width 4 tiles"
        );
    }
}
