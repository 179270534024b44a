use serde::{Deserialize, Serialize};

/// A position on the plan canvas, in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a translated copy of this point
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Rotate this point about `center` by `degrees` (clockwise on a y-down canvas)
    pub fn rotate_about(self, center: Point, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Self {
            x: center.x + dx * cos - dy * sin,
            y: center.y + dx * sin + dy * cos,
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fold an angle in degrees into `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees % 360.0;
    let folded = if folded < 0.0 { folded + 360.0 } else { folded };
    // -1e-20 + 360.0 rounds up to exactly 360.0
    if folded >= 360.0 { 0.0 } else { folded }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = Point::new(10.0, 0.0).rotate_about(Point::default(), 90.0);
        assert!(approx(p, Point::new(0.0, 10.0)));
    }

    #[test]
    fn rotate_about_offset_center() {
        let center = Point::new(5.0, 5.0);
        let p = Point::new(6.0, 5.0).rotate_about(center, 180.0);
        assert!(approx(p, Point::new(4.0, 5.0)));
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
        assert_eq!(normalize_degrees(45.0), 45.0);
    }
}
