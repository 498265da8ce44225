//! World domain: axis-aligned rectangles in simulation space.
//!
//! Simulation space is y-down: a rectangle's `(x, y)` is its top-left corner
//! and "topmost" means the smallest `y`. Bevy renders y-up, so the shell maps
//! points through [`to_render`] / [`from_render`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl WorldRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x * 0.5,
            center.y - size.y * 0.5,
            size.x,
            size.y,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// True when the horizontal extents overlap (touching edges do not count).
    pub fn overlaps_x(&self, other: &WorldRect) -> bool {
        self.right() > other.x && self.x < other.right()
    }

    pub fn intersects(&self, other: &WorldRect) -> bool {
        self.overlaps_x(other) && self.bottom() > other.y && self.y < other.bottom()
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink each side by `shrink`, keeping the result centered.
    ///
    /// A side never drops below `min(min_side, side / 2)`, so with a positive
    /// shrink the result is strictly inside `self` for any positive size.
    pub fn inset(&self, shrink: Vec2, min_side: f32) -> WorldRect {
        let w = (self.w - shrink.x * 2.0).max(min_side.min(self.w * 0.5));
        let h = (self.h - shrink.y * 2.0).max(min_side.min(self.h * 0.5));
        WorldRect::new(
            self.x + (self.w - w) * 0.5,
            self.y + (self.h - h) * 0.5,
            w,
            h,
        )
    }

    pub fn translated(&self, delta: Vec2) -> WorldRect {
        WorldRect::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Strict containment on every edge.
    pub fn strictly_contains(&self, inner: &WorldRect) -> bool {
        inner.x > self.x
            && inner.y > self.y
            && inner.right() < self.right()
            && inner.bottom() < self.bottom()
    }
}

/// Simulation point to Bevy world point.
pub fn to_render(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

/// Bevy world point to simulation point.
pub fn from_render(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}
