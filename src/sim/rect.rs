//! Axis-aligned rectangle geometry
//!
//! Screen space: origin top-left, y increases downward. Every collision test in
//! the simulation goes through `Rect::overlaps`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a top-left corner and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Move so the bottom edge sits at `bottom`
    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap on the x axis only
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }

    /// Strict overlap test. Rectangles that only share an edge do not collide,
    /// so a player resting exactly on a platform top is not "inside" it.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other)
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
