/*
 * Copyright (c) Ferran Pujol Camins. All rights reserved.
 *
 * This software is distributed under the "New BSD License" agreement.
 * The full license text is reproduced in the recognizer sources of this crate.
 */
use crate::point::Point;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Computes the Euclidean distance between two points
pub fn euclidean_distance(a: &Point, b: &Point) -> f32 {
    sqr_euclidean_distance(a, b).sqrt()
}

/// Computes the squared Euclidean distance between two points
pub fn sqr_euclidean_distance(a: &Point, b: &Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Axis-aligned rectangle in screen space.
/// Edges are inclusive: a point lying exactly on the boundary is inside.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Rect {
    /// Builds a rectangle from two opposite corners, in any order.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Projects a point onto the closest location inside the rectangle.
    /// Points already inside are returned unchanged.
    pub fn clamp(&self, p: &Point) -> Point {
        Point::new(
            p.x.max(self.min_x).min(self.max_x),
            p.y.max(self.min_y).min(self.max_y),
            p.stroke_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(0.0, 0.0, 0);
        let b = Point::new(3.0, 4.0, 0);
        assert_eq!(sqr_euclidean_distance(&a, &b), 25.0);
        assert_eq!(euclidean_distance(&a, &b), 5.0);
    }

    #[test]
    fn rect_normalizes_corners() {
        let r = Rect::new(200.0, 200.0, 0.0, 0.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(r.width(), 200.0);
        assert_eq!(r.height(), 200.0);
    }

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 200.0, 200.0);
        assert!(r.contains(&Point::new(0.0, 200.0, 0)));
        assert!(r.contains(&Point::new(100.0, 100.0, 0)));
        assert!(!r.contains(&Point::new(300.0, 300.0, 0)));
        assert!(!r.contains(&Point::new(-0.1, 50.0, 0)));
    }

    #[test]
    fn clamp_projects_to_nearest_boundary_point() {
        let r = Rect::new(0.0, 0.0, 200.0, 200.0);
        let p = r.clamp(&Point::new(300.0, 50.0, 4));
        assert_eq!((p.x, p.y, p.stroke_id), (200.0, 50.0, 4));
        let p = r.clamp(&Point::new(-10.0, -20.0, 0));
        assert_eq!((p.x, p.y), (0.0, 0.0));
        let inside = Point::new(10.0, 20.0, 0);
        assert_eq!(r.clamp(&inside), inside);
    }
}
