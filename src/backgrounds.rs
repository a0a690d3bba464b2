//! Background selection per level
//!
//! The core never looks inside a background; it only stores and forwards the
//! handle the asset layer gave it.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Opaque handle to a background image owned by the asset layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BackgroundHandle(pub u32);

/// Supplies a background for each level index
pub trait BackgroundSource {
    fn background(&self, level_index: u32) -> BackgroundHandle;
}

/// Cycles through `count` backgrounds in order, wrapping around
#[derive(Debug, Clone, Copy)]
pub struct CyclingBackgrounds {
    count: u32,
}

impl CyclingBackgrounds {
    pub fn new(count: u32) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::NoBackgrounds);
        }
        Ok(Self { count })
    }
}

impl BackgroundSource for CyclingBackgrounds {
    fn background(&self, level_index: u32) -> BackgroundHandle {
        BackgroundHandle(level_index % self.count)
    }
}
