//! Collision primitives
//!
//! Everything in the game collides as either an axis-aligned box or a circle.
//! Screen space: origin top-left, +y down.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
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

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict AABB overlap (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// True once no part of the rectangle is inside the viewport
    pub fn is_outside_viewport(&self) -> bool {
        self.y > SCREEN_HEIGHT || self.right() < 0.0 || self.x > SCREEN_WIDTH
    }
}

/// Circle-vs-circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// True when a point has left the viewport
#[inline]
pub fn point_outside_viewport(p: Vec2) -> bool {
    p.x < 0.0 || p.x > SCREEN_WIDTH || p.y < 0.0 || p.y > SCREEN_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_centered_rect() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), 4.0, 4.0);
        assert_eq!(r, Rect::new(48.0, 48.0, 4.0, 4.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(25.0, 0.0), 10.0));
    }

    #[test]
    fn test_viewport_bounds() {
        // Spawned above the screen, still considered "inside" until it passes the bottom
        let spawning = Rect::new(100.0, -48.0, 48.0, 48.0);
        assert!(!spawning.is_outside_viewport());

        let below = Rect::new(100.0, SCREEN_HEIGHT + 1.0, 48.0, 48.0);
        assert!(below.is_outside_viewport());

        let left = Rect::new(-60.0, 100.0, 48.0, 48.0);
        assert!(left.is_outside_viewport());

        assert!(point_outside_viewport(Vec2::new(-1.0, 10.0)));
        assert!(point_outside_viewport(Vec2::new(10.0, SCREEN_HEIGHT + 0.5)));
        assert!(!point_outside_viewport(Vec2::new(400.0, 300.0)));
    }
}
