//! Geometry primitives shared by the partitioner and centroid math.
//!
//! Coordinates live in a y-up plane anchored at the origin; polygons are
//! stored as counter-clockwise vertex loops, closed implicitly.

use serde::Serialize;

/// A point in the field plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Midpoint of the segment to another point.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Rectangular extent of the field, anchored at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Bounds {
        Bounds { width, height }
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// Corner loop in counter-clockwise order starting at the origin.
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
    }
}

/// Tests whether `p` lies inside the counter-clockwise convex loop `vertices`.
///
/// Positive `slack` admits points slightly outside the loop; negative `slack`
/// demands the point be interior by that margin. Returns false for loops with
/// fewer than three vertices.
pub fn convex_contains(vertices: &[Point], p: Point, slack: f64) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross < -slack {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_sq_is_squared_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_sq(b), 25.0);
        assert_eq!(b.distance_sq(a), 25.0);
        assert_eq!(a.distance_sq(a), 0.0);
    }

    #[test]
    fn midpoint_halves_the_segment() {
        let a = Point::new(2.0, 0.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.midpoint(b), Point::new(3.0, 3.0));
    }

    #[test]
    fn corners_are_counter_clockwise() {
        // Shoelace over the corner loop must come out positive.
        let corners = Bounds::new(10.0, 5.0).corners();
        let mut area = 0.0;
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            area += 0.5 * (a.x * b.y - b.x * a.y);
        }
        assert!(area > 0.0);
        assert_eq!(area, 50.0);
    }

    #[test]
    fn convex_contains_interior_and_exterior() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!(convex_contains(&square, Point::new(0.5, 0.5), 0.0));
        assert!(!convex_contains(&square, Point::new(1.5, 0.5), 0.0));
        assert!(!convex_contains(&square, Point::new(-0.1, 0.5), 0.0));
    }

    #[test]
    fn convex_contains_slack_controls_the_boundary() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let on_edge = Point::new(1.0, 0.5);
        // Lenient: boundary points count as inside.
        assert!(convex_contains(&square, on_edge, 1e-9));
        // Strict: boundary points are rejected.
        assert!(!convex_contains(&square, on_edge, -1e-9));
        // Interior points pass either way.
        assert!(convex_contains(&square, Point::new(0.5, 0.5), -1e-9));
    }

    #[test]
    fn convex_contains_rejects_degenerate_loops() {
        let segment = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        assert!(!convex_contains(&segment, Point::new(0.5, 0.0), 1e-9));
    }
}
