use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::polygon::{approximate_polygon, arc_length, contour_area, is_convex};

/// One closed external boundary found in an edge mask, as ordered integer
/// pixel coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point2<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point2<i32>>) -> Self {
        Self { points }
    }

    pub fn from_xy(xy: &[(i32, i32)]) -> Self {
        Self::new(xy.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn area(&self) -> f64 {
        contour_area(&self.points)
    }

    pub fn perimeter(&self) -> f64 {
        arc_length(&self.points, true)
    }

    /// Points converted to floating point, e.g. for fitting.
    pub fn points_f64(&self) -> Vec<Point2<f64>> {
        self.points.iter().map(|p| p.cast::<f64>()).collect()
    }
}

impl From<Vec<Point2<i32>>> for Contour {
    fn from(points: Vec<Point2<i32>>) -> Self {
        Self::new(points)
    }
}

/// Scalar descriptors derived from one contour, computed fresh per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeCandidate {
    pub area: f64,
    pub perimeter: f64,
    /// Simplified closed polygon at `epsilon_frac · perimeter` tolerance.
    pub polygon: Vec<Point2<i32>>,
    pub convex: bool,
}

impl ShapeCandidate {
    /// Describe `contour`, reusing an `area` the caller already computed for
    /// its fast-rejection check.
    pub fn describe(contour: &Contour, area: f64, epsilon_frac: f64) -> Self {
        let perimeter = contour.perimeter();
        let polygon = approximate_polygon(&contour.points, epsilon_frac * perimeter, true);
        let convex = is_convex(&polygon);
        Self {
            area,
            perimeter,
            polygon,
            convex,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.polygon.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic;

    #[test]
    fn circle_describes_as_many_sided_convex_polygon() {
        let c = synthetic::circle_contour(Point2::new(100.0, 100.0), 40.0);
        let cand = ShapeCandidate::describe(&c, c.area(), 0.02);
        assert!(cand.vertex_count() > 6, "got {}", cand.vertex_count());
        assert!(cand.convex);
    }

    #[test]
    fn rectangle_describes_as_convex_quad() {
        let c = synthetic::rectangle_contour(Point2::new(200.0, 150.0), 300.0, 180.0, 0.0);
        let cand = ShapeCandidate::describe(&c, c.area(), 0.02);
        assert_eq!(cand.vertex_count(), 4);
        assert!(cand.convex);
        assert!((cand.area - 300.0 * 180.0).abs() / (300.0 * 180.0) < 0.02);
    }

    #[test]
    fn contour_roundtrips_through_json() {
        let c = Contour::from_xy(&[(0, 0), (4, 0), (4, 3)]);
        let json = serde_json::to_string(&c).unwrap();
        let back: Contour = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
