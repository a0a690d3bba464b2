//! The player sprite
//!
//! Horizontal movement wraps around the window edges. Gravity only applies
//! while airborne; while standing on a platform the player's bottom edge is
//! pinned to the platform top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{PlatformId, SimEvent};
use super::platform::Platform;
use super::rect::Rect;
use crate::config::GameConfig;

/// Animation status, used by the render sink to pick a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    Left,
    Right,
    LeftIdle,
    #[default]
    RightIdle,
}

/// Coarse movement state, derived from the player's fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// Standing on a platform
    Grounded,
    /// Jumping, still moving up
    Rising,
    /// Not attached to anything
    Falling,
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// x: horizontal intent in {-1, 0, +1}; y: vertical velocity (pixels/tick)
    pub direction: Vec2,
    pub jumping: bool,
    /// Platform currently stood on. Non-owning: the level owns every platform.
    pub current_platform: Option<PlatformId>,
    pub status: PlayerStatus,
    /// Set once the player has fallen out of the window
    pub dead: bool,

    speed: f32,
    gravity: f32,
    jump_impulse: f32,
    window_width: f32,
    window_height: f32,
}

impl Player {
    pub fn new(spawn: Vec2, config: &GameConfig) -> Self {
        let (w, h) = config.player_size();
        Self {
            pos: spawn,
            size: Vec2::new(w, h),
            direction: Vec2::ZERO,
            jumping: false,
            current_platform: None,
            status: PlayerStatus::default(),
            dead: false,
            speed: config.player_speed,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            window_width: config.window_width(),
            window_height: config.window_height(),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn motion(&self) -> MotionState {
        if self.current_platform.is_some() && !self.jumping {
            MotionState::Grounded
        } else if self.jumping && self.direction.y < 0.0 {
            MotionState::Rising
        } else {
            MotionState::Falling
        }
    }

    /// Set horizontal intent; anything outside {-1, 0, +1} is clamped to its sign
    pub fn set_horizontal(&mut self, dir: f32) {
        self.direction.x = if dir < 0.0 {
            -1.0
        } else if dir > 0.0 {
            1.0
        } else {
            0.0
        };
    }

    /// Start a jump. Returns false (and does nothing) if already jumping.
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.direction.y = self.jump_impulse;
        true
    }

    /// Advance one tick: horizontal move, gravity, platform resolution, death check
    pub fn update(
        &mut self,
        exit: &mut Option<Platform>,
        platforms: &mut [Platform],
        events: &mut Vec<SimEvent>,
    ) {
        if self.dead {
            return;
        }

        self.move_horizontal();
        self.apply_gravity();
        self.resolve_vertical(exit, platforms);
        self.update_status();

        if self.rect().top() > self.window_height {
            self.dead = true;
            events.push(SimEvent::Died);
        }
    }

    /// Follow the attached platform after it has scrolled
    pub fn ride(&mut self, platform_top: f32) {
        if self.current_platform.is_some() && !self.jumping {
            self.stand_on(platform_top);
        }
    }

    /// Put the player's bottom edge on `top`
    fn stand_on(&mut self, top: f32) {
        let mut rect = self.rect();
        rect.set_bottom(top);
        self.pos = rect.top_left();
    }

    fn move_horizontal(&mut self) {
        self.pos.x += self.speed * self.direction.x;

        // Cylinder: leaving one side re-enters on the other, offset preserved
        let rect = self.rect();
        if rect.right() < 0.0 {
            self.pos.x += self.window_width;
        } else if rect.left() > self.window_width {
            self.pos.x -= self.window_width;
        }
    }

    fn apply_gravity(&mut self) {
        if self.current_platform.is_none() {
            self.direction.y += self.gravity;
            self.pos.y += self.direction.y;
        }
    }

    fn resolve_vertical(&mut self, exit: &mut Option<Platform>, platforms: &mut [Platform]) {
        match self.current_platform {
            Some(id) if !self.jumping => {
                let rect = self.rect();
                match exit
                    .iter_mut()
                    .chain(platforms.iter_mut())
                    .find(|p| p.id == id && p.alive)
                {
                    Some(platform) if platform.rect.overlaps_x(&rect) => {
                        self.stand_on(platform.rect.top());
                    }
                    // Walked off the edge: fall from the next tick
                    Some(platform) => {
                        platform.player_attached = false;
                        self.current_platform = None;
                    }
                    None => self.current_platform = None,
                }
            }
            Some(id) => {
                if let Some(platform) = exit
                    .iter_mut()
                    .chain(platforms.iter_mut())
                    .find(|p| p.id == id)
                {
                    platform.player_attached = false;
                }
                self.current_platform = None;
            }
            None => self.try_land(exit, platforms),
        }
    }

    /// Attach to the first platform (exit platform first, then spawn order)
    /// that overlaps the player from above.
    fn try_land(&mut self, exit: &mut Option<Platform>, platforms: &mut [Platform]) {
        let rect = self.rect();
        let landing = exit
            .iter_mut()
            .chain(platforms.iter_mut())
            .filter(|p| p.alive)
            .find(|p| p.rect.overlaps(&rect) && rect.center_y() < p.rect.center_y());

        if let Some(platform) = landing {
            platform.player_attached = true;
            self.direction.y = 0.0;
            self.stand_on(platform.rect.top());
            self.jumping = false;
            self.current_platform = Some(platform.id);
        }
    }

    fn update_status(&mut self) {
        self.status = if self.direction.x < 0.0 {
            PlayerStatus::Left
        } else if self.direction.x > 0.0 {
            PlayerStatus::Right
        } else {
            match self.status {
                PlayerStatus::Left | PlayerStatus::LeftIdle => PlayerStatus::LeftIdle,
                PlayerStatus::Right | PlayerStatus::RightIdle => PlayerStatus::RightIdle,
            }
        };
    }
}
