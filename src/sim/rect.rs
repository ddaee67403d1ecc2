//! Axis-aligned bounding boxes
//!
//! All gameplay collision is AABB overlap with half-open intervals:
//! boxes that merely touch along an edge do not collide.

use glam::Vec2;

/// An axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
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

    /// Half-open overlap test; shared edges are not an overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_collide() {
        let player = Rect::new(10.0, 10.0, 10.0, 10.0);
        let obstacle = Rect::new(15.0, 15.0, 10.0, 10.0);
        assert!(player.overlaps(&obstacle));
        assert!(obstacle.overlaps(&player));
    }

    #[test]
    fn test_edge_touching_boxes_do_not_collide() {
        let player = Rect::new(0.0, 0.0, 5.0, 5.0);
        let obstacle = Rect::new(5.0, 5.0, 5.0, 5.0);
        assert!(!player.overlaps(&obstacle));
        assert!(!obstacle.overlaps(&player));
    }

    #[test]
    fn test_disjoint_boxes_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 5.0, 5.0);
        let b = Rect::new(100.0, 0.0, 5.0, 5.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contained_box_collides() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
