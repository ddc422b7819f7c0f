//! Deterministic synthetic contours.
//!
//! Used by the unit/integration tests and the benchmarks of the workspace
//! crates. Every generator walks the ideal outline densely, rounds to the
//! pixel grid, and drops consecutive duplicates, which is close to what a
//! border-following contour extractor returns for a clean edge mask.

use nalgebra::Point2;

use crate::Contour;

/// Ellipse boundary with full axis lengths `width` × `height` rotated by
/// `angle_deg`.
pub fn ellipse_contour(center: Point2<f64>, width: f64, height: f64, angle_deg: f64) -> Contour {
    let a = 0.5 * width;
    let b = 0.5 * height;
    let steps = ((std::f64::consts::TAU * a.max(b)) * 2.0).ceil().max(16.0) as usize;
    let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();
    let pts = (0..steps).map(|i| {
        let t = std::f64::consts::TAU * i as f64 / steps as f64;
        let (ex, ey) = (a * t.cos(), b * t.sin());
        Point2::new(
            center.x + cos_t * ex - sin_t * ey,
            center.y + sin_t * ex + cos_t * ey,
        )
    });
    rasterize(pts)
}

/// Circle boundary of the given radius.
pub fn circle_contour(center: Point2<f64>, radius: f64) -> Contour {
    ellipse_contour(center, 2.0 * radius, 2.0 * radius, 0.0)
}

/// Circle boundary whose enclosed area is approximately `area` px².
pub fn circle_with_area(center: Point2<f64>, area: f64) -> Contour {
    circle_contour(center, (area / std::f64::consts::PI).sqrt())
}

/// Rectangle outline `width` × `height` rotated by `angle_deg` about its
/// center.
pub fn rectangle_contour(center: Point2<f64>, width: f64, height: f64, angle_deg: f64) -> Contour {
    let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();
    let corners: Vec<Point2<f64>> = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .iter()
        .map(|&(sx, sy)| {
            let (x, y) = (sx * 0.5 * width, sy * 0.5 * height);
            Point2::new(center.x + cos_t * x - sin_t * y, center.y + sin_t * x + cos_t * y)
        })
        .collect();
    polygon_contour(&corners)
}

/// Outline of an arbitrary closed polygon through `vertices`.
pub fn polygon_contour(vertices: &[Point2<f64>]) -> Contour {
    let n = vertices.len();
    let pts = (0..n).flat_map(|i| {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let steps = (b - a).norm().ceil().max(1.0) as usize;
        (0..steps).map(move |k| a + (b - a) * (k as f64 / steps as f64))
    });
    rasterize(pts)
}

fn rasterize(pts: impl Iterator<Item = Point2<f64>>) -> Contour {
    let mut out: Vec<Point2<i32>> = Vec::new();
    for p in pts {
        let q = Point2::new(p.x.round() as i32, p.y.round() as i32);
        if out.last() != Some(&q) {
            out.push(q);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    Contour::new(out)
}
