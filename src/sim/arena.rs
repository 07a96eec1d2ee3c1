//! Arena geometry
//!
//! A `width` x `height` rectangle in surface coordinates (origin top-left,
//! y grows downward). Left/right walls are solid; the top and bottom walls
//! each have a centred goal opening of `goal_width`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GOAL_WIDTH_FRACTION;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub goal_width: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, goal_width: f32) -> Self {
        Self {
            width,
            height,
            goal_width,
        }
    }

    /// Arena sized to a surface, goal opening a fraction of the width
    pub fn from_surface(size: (u32, u32), goal_fraction: f32) -> Self {
        let width = size.0 as f32;
        Self::new(width, size.1 as f32, width * goal_fraction)
    }

    #[inline]
    pub fn goal_left(&self) -> f32 {
        (self.width - self.goal_width) / 2.0
    }

    #[inline]
    pub fn goal_right(&self) -> f32 {
        self.goal_left() + self.goal_width
    }

    /// Whether `x` lies strictly inside the goal opening.
    /// A puck exactly on a goal post hits the wall.
    #[inline]
    pub fn in_goal_span(&self, x: f32) -> bool {
        x > self.goal_left() && x < self.goal_right()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Goal width as a fraction of arena width (falls back to the default for a
    /// zero-width arena)
    pub fn goal_fraction(&self) -> f32 {
        if self.width > 0.0 {
            self.goal_width / self.width
        } else {
            GOAL_WIDTH_FRACTION
        }
    }

    /// Adopt a new surface size, keeping the goal opening proportional
    pub fn resize(&mut self, size: (u32, u32)) {
        *self = Self::from_surface(size, self.goal_fraction());
    }

    /// Surface size this arena was built for
    pub fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_span() {
        let arena = Arena::new(1000.0, 1000.0, 400.0);
        assert_eq!(arena.goal_left(), 300.0);
        assert_eq!(arena.goal_right(), 700.0);

        assert!(arena.in_goal_span(500.0));
        assert!(arena.in_goal_span(300.5));
        // Posts are exclusive
        assert!(!arena.in_goal_span(300.0));
        assert!(!arena.in_goal_span(700.0));
        assert!(!arena.in_goal_span(100.0));
    }

    #[test]
    fn test_from_surface_and_resize() {
        let mut arena = Arena::from_surface((1000, 800), 0.4);
        assert_eq!(arena.goal_width, 400.0);
        assert_eq!(arena.center(), Vec2::new(500.0, 400.0));

        arena.resize((500, 900));
        assert_eq!(arena.width, 500.0);
        assert_eq!(arena.height, 900.0);
        assert!((arena.goal_width - 200.0).abs() < 1e-3);
        assert_eq!(arena.size(), (500, 900));
    }
}
