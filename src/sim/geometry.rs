//! Axis-aligned rectangle geometry
//!
//! Screen coordinates: origin at the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.bottom() > other.top()
            && self.left() < other.right()
            && self.top() < other.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 8.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 18.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(14.0, 40.0));
    }

    #[test]
    fn test_overlap() {
        let paddle = Rect::new(385.0, 100.0, 15.0, 100.0);
        assert!(Rect::new(380.0, 140.0, 15.0, 15.0).overlaps(&paddle));
        assert!(!Rect::new(300.0, 140.0, 15.0, 15.0).overlaps(&paddle));
        assert!(!Rect::new(380.0, 250.0, 15.0, 15.0).overlaps(&paddle));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let paddle = Rect::new(385.0, 100.0, 15.0, 100.0);
        // Flush against the left face
        assert!(!Rect::new(370.0, 140.0, 15.0, 15.0).overlaps(&paddle));
        // Resting on the top edge
        assert!(!Rect::new(390.0, 85.0, 15.0, 15.0).overlaps(&paddle));
    }
}
