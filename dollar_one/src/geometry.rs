use serde_derive::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D coordinate pair. Also used as a plain vector (differences, scale factors).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    // Distance between two points
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    // Length of the point read as a vector
    pub fn magnitude(self) -> f64 {
        self.distance_to(Point::ORIGIN)
    }

    // Direction of the point read as a vector, in radians; 0 is along +x
    pub fn heading(self) -> f64 {
        self.y.atan2(self.x)
    }

    // Rotates this point about `pivot` by `radians`
    pub fn rotate_about(self, pivot: Point, radians: f64) -> Point {
        let (sin, cos) = radians.sin_cos();
        let d = self - pivot;
        Point {
            x: d.x * cos - d.y * sin + pivot.x,
            y: d.x * sin + d.y * cos + pivot.y,
        }
    }

    // Componentwise product
    pub fn scale(self, factor: Point) -> Point {
        Point {
            x: self.x * factor.x,
            y: self.y * factor.y,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Point {
        Point { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Point {
        Point { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> [f64; 2] {
        [p.x, p.y]
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

// Total length of the polyline through `points`
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}

// Point at fraction `amount` of the way from `a` to `b`
pub fn lerp(a: Point, b: Point, amount: f64) -> Point {
    Point {
        x: a.x + amount * (b.x - a.x),
        y: a.y + amount * (b.y - a.y),
    }
}

// Componentwise mean; the origin for an empty slice
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let mut sum = Point::ORIGIN;
    for p in points {
        sum = sum + *p;
    }
    sum * (1.0 / points.len() as f64)
}

// None for an empty slice
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let mut rect = Rect {
        left: first.x,
        right: first.x,
        top: first.y,
        bottom: first.y,
    };
    for p in &points[1..] {
        rect.left = rect.left.min(p.x);
        rect.right = rect.right.max(p.x);
        rect.top = rect.top.min(p.y);
        rect.bottom = rect.bottom.max(p.y);
    }
    Some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_distance_and_length() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < EPS);
        let path = [a, b, Point::new(3.0, 10.0)];
        assert!((path_length(&path) - 11.0).abs() < EPS);
        assert_eq!(path_length(&path[..1]), 0.0);
    }

    #[test]
    fn test_lerp() {
        let p = lerp(Point::new(0.0, 0.0), Point::new(10.0, -20.0), 0.25);
        assert_eq!(p, Point::new(2.5, -5.0));
    }

    #[test]
    fn test_centroid() {
        let c = centroid(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 6.0)]);
        assert!((c.x - 2.0).abs() < EPS);
        assert!((c.y - 2.0).abs() < EPS);
        assert_eq!(centroid(&[]), Point::ORIGIN);
    }

    #[test]
    fn test_bounding_rect() {
        let rect = bounding_rect(&[Point::new(1.0, 5.0), Point::new(-3.0, 2.0), Point::new(4.0, 9.0)]).unwrap();
        assert_eq!(rect.width(), 7.0);
        assert_eq!(rect.height(), 7.0);
        assert!(bounding_rect(&[]).is_none());
    }

    #[test]
    fn test_heading_and_rotation() {
        assert!((Point::new(0.0, 1.0).heading() - PI / 2.0).abs() < EPS);
        let rotated = Point::new(2.0, 1.0).rotate_about(Point::new(1.0, 1.0), PI / 2.0);
        assert!((rotated.x - 1.0).abs() < EPS);
        assert!((rotated.y - 2.0).abs() < EPS);
    }
}
