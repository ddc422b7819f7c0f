use nalgebra::{Point2, Vector2};

use crate::polygon::turn;
use crate::{RotatedRect, NUMERIC_EPSILON};

/// Convex hull (Andrew's monotone chain), counter-clockwise in a y-up frame,
/// without repeated or collinear vertices.
pub fn convex_hull(points: &[Point2<i32>]) -> Vec<Point2<i32>> {
    let mut pts = points.to_vec();
    pts.sort_unstable_by(|a, b| (a.x, a.y).cmp(&(b.x, b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point2<i32>> = Vec::with_capacity(2 * pts.len());
    for &p in &pts {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    // upper chain must not eat into the lower one
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Minimum-area enclosing rotated rectangle of a point set.
///
/// The optimum has one side collinear with a hull edge, so every hull edge
/// direction is tried. Degenerate inputs produce zero-size rectangles rather
/// than errors.
pub fn min_area_rect(points: &[Point2<i32>]) -> RotatedRect {
    let hull: Vec<Point2<f64>> = convex_hull(points).iter().map(|p| p.cast::<f64>()).collect();
    match hull.len() {
        0 => return RotatedRect::default(),
        1 => return RotatedRect::new(hull[0], 0.0, 0.0, 0.0),
        _ => {}
    }

    let mut best: Option<(f64, RotatedRect)> = None;
    for i in 0..hull.len() {
        let edge = hull[(i + 1) % hull.len()] - hull[i];
        let len = edge.norm();
        if len <= NUMERIC_EPSILON {
            continue;
        }
        let u = edge / len;
        let v = Vector2::new(-u.y, u.x);

        let (mut u_lo, mut u_hi, mut v_lo, mut v_hi) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for p in &hull {
            let d = p - hull[i];
            let (pu, pv) = (d.dot(&u), d.dot(&v));
            u_lo = u_lo.min(pu);
            u_hi = u_hi.max(pu);
            v_lo = v_lo.min(pv);
            v_hi = v_hi.max(pv);
        }

        let (w, h) = (u_hi - u_lo, v_hi - v_lo);
        let area = w * h;
        if best.as_ref().is_none_or(|(a, _)| area < *a) {
            let center = hull[i] + u * (0.5 * (u_lo + u_hi)) + v * (0.5 * (v_lo + v_hi));
            let angle = u.y.atan2(u.x).to_degrees();
            best = Some((area, RotatedRect::new(center, w, h, angle)));
        }
    }
    best.map(|(_, r)| r).unwrap_or_default()
}
