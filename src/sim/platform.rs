//! Scrolling platforms
//!
//! Normal and exit platforms share one type; `PlatformKind` selects the
//! update contract.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{PlatformId, SimEvent};
use super::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Scores once on first landing, dies off-screen
    #[default]
    Normal,
    /// Advances the level; permanent for the level's duration
    Exit,
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub kind: PlatformKind,
    pub rect: Rect,
    /// Speed applied on the last update (pixels per tick)
    pub speed: f32,
    /// Width class in tiles (2-5)
    pub width_tiles: u32,
    /// Cleared when a normal platform leaves the window; swept after the pass
    pub alive: bool,
    /// Set by the player while standing on this platform
    pub player_attached: bool,
    /// Latched on first landing so `Landed` fires only once
    pub has_player: bool,
}

impl Platform {
    /// Spawn at pixel position (`x`, `y`) with a size given in tiles
    pub fn new(
        id: PlatformId,
        kind: PlatformKind,
        x: f32,
        y: f32,
        width_tiles: u32,
        height_tiles: u32,
        tile_size: f32,
    ) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(
                x,
                y,
                width_tiles as f32 * tile_size,
                height_tiles as f32 * tile_size,
            ),
            speed: 0.0,
            width_tiles,
            alive: true,
            player_attached: false,
            has_player: false,
        }
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        self.kind == PlatformKind::Exit
    }

    /// Scroll down by `speed` and report landing / off-screen events
    pub fn update(&mut self, speed: f32, window_height: f32, events: &mut Vec<SimEvent>) {
        self.speed = speed;
        self.rect.translate(Vec2::new(0.0, speed));

        match self.kind {
            PlatformKind::Normal => {
                if self.player_attached && !self.has_player {
                    self.has_player = true;
                    events.push(SimEvent::Landed(self.id));
                }
                if self.alive && self.rect.top() > window_height {
                    self.alive = false;
                    events.push(SimEvent::Killed(self.id));
                }
            }
            PlatformKind::Exit => {
                if self.player_attached {
                    events.push(SimEvent::ExitReached(self.id));
                }
            }
        }
    }
}
