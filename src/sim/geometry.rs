//! Planar geometry for circular bodies and the rectangular play area

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Strict circle overlap test. Tangent circles do not collide.
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    distance(a_pos, b_pos) < a_radius + b_radius
}

/// Axis-aligned playable rectangle in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        // Left 80% of a 1280x720 window; the rest is the scoreboard
        Self::new(0.0, 0.0, 1024.0, 720.0)
    }
}

impl PlayArea {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Point at the given fraction of width and height
    pub fn point_at(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.left + self.width * fx, self.top + self.height * fy)
    }

    pub fn center(&self) -> Vec2 {
        self.point_at(0.5, 0.5)
    }

    /// Clamp a circle center so the whole circle stays inside the area
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.min(self.right() - radius).max(self.left + radius),
            pos.y.min(self.bottom() - radius).max(self.top + radius),
        )
    }

    /// Whether a circle lies fully inside the area (edges inclusive)
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= self.left
            && pos.x + radius <= self.right()
            && pos.y - radius >= self.top
            && pos.y + radius <= self.bottom()
    }

    /// True once a circle has fully left the area through an edge it is
    /// moving away from. Circles still approaching from outside are kept.
    pub fn has_exited(&self, pos: Vec2, radius: f32, vel: Vec2) -> bool {
        (pos.x + radius < self.left && vel.x < 0.0)
            || (pos.x - radius > self.right() && vel.x > 0.0)
            || (pos.y + radius < self.top && vel.y < 0.0)
            || (pos.y - radius > self.bottom() && vel.y > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tangent_circles_do_not_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(!circles_overlap(a, 4.0, b, 6.0));
        assert!(circles_overlap(a, 4.0, b, 6.01));
    }

    #[test]
    fn test_circle_overlaps_itself() {
        let p = Vec2::new(3.0, -7.0);
        assert!(circles_overlap(p, 0.5, p, 0.5));
    }

    #[test]
    fn test_clamp_circle_keeps_circle_inside() {
        let area = PlayArea::new(10.0, 20.0, 100.0, 50.0);
        let p = area.clamp_circle(Vec2::new(-40.0, 500.0), 5.0);
        assert_eq!(p, Vec2::new(15.0, 65.0));
        assert!(area.contains_circle(p, 5.0));
    }

    #[test]
    fn test_has_exited_is_directional() {
        let area = PlayArea::new(0.0, 0.0, 100.0, 100.0);
        // Left of the area and still approaching: keep
        assert!(!area.has_exited(Vec2::new(-20.0, 50.0), 5.0, Vec2::new(3.0, 0.0)));
        // Left of the area and leaving: cull
        assert!(area.has_exited(Vec2::new(-20.0, 50.0), 5.0, Vec2::new(-3.0, 0.0)));
        // Only partially outside: keep
        assert!(!area.has_exited(Vec2::new(103.0, 50.0), 5.0, Vec2::new(3.0, 0.0)));
        // Below the area and falling: cull
        assert!(area.has_exited(Vec2::new(50.0, 106.0), 5.0, Vec2::new(0.0, 1.0)));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, ar in 0.1f32..50.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, br in 0.1f32..50.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ar, b, br), circles_overlap(b, br, a, ar));
        }

        #[test]
        fn prop_clamped_circle_is_inside(
            x in -2000.0f32..2000.0, y in -2000.0f32..2000.0, r in 1.0f32..40.0,
        ) {
            let area = PlayArea::default();
            let p = area.clamp_circle(Vec2::new(x, y), r);
            prop_assert!(p.x >= area.left + r && p.x <= area.right() - r);
            prop_assert!(p.y >= area.top + r && p.y <= area.bottom() - r);
        }
    }
}
