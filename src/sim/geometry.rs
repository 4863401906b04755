//! Axis-aligned rectangle and circle geometry
//!
//! Everything in a level is either a rect (obstacles, traps, doors, switches,
//! player and enemy bodies) or a circle (portal, keys, powerups, projectiles).
//! Overlap tests are strict: rects that only share an edge do not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of the given size with its top-left corner at `pos`
    #[inline]
    pub fn at(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Inclusive point containment
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Closest point inside the rect to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }
}

/// A circle (portal, keys, powerups)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// True when `p` lies strictly inside the circle
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.distance(self.center()) < self.radius
    }

    /// Circle-vs-rect overlap via the rect's closest point
    #[inline]
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest = rect.closest_point(self.center());
        closest.distance_squared(self.center()) < self.radius * self.radius
    }

    #[inline]
    pub fn overlaps_circle(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center().distance_squared(other.center()) < reach * reach
    }
}

/// Clamp a rect's top-left corner so the whole rect stays inside `[0, width] x [0, height]`
#[inline]
pub fn clamp_to_bounds(pos: Vec2, w: f32, h: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, (width - w).max(0.0)),
        pos.y.clamp(0.0, (height - h).max(0.0)),
    )
}
