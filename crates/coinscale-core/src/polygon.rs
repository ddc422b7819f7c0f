//! Polygon primitives over integer pixel boundaries.

use nalgebra::Point2;

use crate::NUMERIC_EPSILON;

/// Unsigned enclosed area of a closed polygon (shoelace formula).
///
/// Fewer than 3 points enclose nothing and return `0.0`.
pub fn contour_area(points: &[Point2<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice: i128 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice += p.x as i128 * q.y as i128 - q.x as i128 * p.y as i128;
    }
    (twice as f64).abs() * 0.5
}

/// Total length of the polyline; `closed` adds the segment back to the start.
pub fn arc_length(points: &[Point2<i32>], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut len: f64 = points.windows(2).map(|w| dist(w[0], w[1])).sum();
    if closed {
        len += dist(points[points.len() - 1], points[0]);
    }
    len
}

/// Douglas–Peucker polygon simplification with tolerance `epsilon` (pixels).
///
/// For closed curves the boundary is split at the first point and the point
/// farthest from it; each half is simplified independently and the halves are
/// joined without repeating the split points.
pub fn approximate_polygon(points: &[Point2<i32>], epsilon: f64, closed: bool) -> Vec<Point2<i32>> {
    if points.len() < 3 {
        return points.to_vec();
    }
    if !closed {
        return douglas_peucker(points, epsilon);
    }

    let origin = points[0];
    let mut split = 0;
    let mut best = -1.0;
    for (i, &p) in points.iter().enumerate() {
        let d = dist(origin, p);
        if d > best {
            best = d;
            split = i;
        }
    }
    if split == 0 {
        return vec![origin];
    }

    let first_half = douglas_peucker(&points[..=split], epsilon);
    let mut tail: Vec<Point2<i32>> = points[split..].to_vec();
    tail.push(origin);
    let second_half = douglas_peucker(&tail, epsilon);

    let mut out = first_half;
    if second_half.len() > 2 {
        out.extend_from_slice(&second_half[1..second_half.len() - 1]);
    }
    out
}

fn douglas_peucker(points: &[Point2<i32>], epsilon: f64) -> Vec<Point2<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0usize, n - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let mut idx = first;
        let mut dmax = 0.0;
        for i in first + 1..last {
            let d = line_distance(points[i], points[first], points[last]);
            if d > dmax {
                dmax = d;
                idx = i;
            }
        }
        if dmax > epsilon {
            keep[idx] = true;
            stack.push((first, idx));
            stack.push((idx, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// True when every turn of the closed polygon has the same orientation.
///
/// Collinear vertices are tolerated; polygons with fewer than 3 vertices or
/// with no turn at all are not convex.
pub fn is_convex(polygon: &[Point2<i32>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut positive = false;
    let mut negative = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let c = polygon[(i + 2) % n];
        let cross = turn(a, b, c);
        if cross > 0 {
            positive = true;
        } else if cross < 0 {
            negative = true;
        }
        if positive && negative {
            return false;
        }
    }
    positive || negative
}

/// Cosine of the angle at `vertex` between the rays towards `p1` and `p2`.
///
/// Zero-length rays are left unnormalised, and the result is clamped to
/// `[-1, 1]`.
pub fn angle_cosine(p1: Point2<i32>, vertex: Point2<i32>, p2: Point2<i32>) -> f64 {
    let mut v1 = p1.cast::<f64>() - vertex.cast::<f64>();
    let mut v2 = p2.cast::<f64>() - vertex.cast::<f64>();
    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 > NUMERIC_EPSILON {
        v1 /= n1;
    }
    if n2 > NUMERIC_EPSILON {
        v2 /= n2;
    }
    v1.dot(&v2).clamp(-1.0, 1.0)
}

/// Largest absolute corner cosine of a closed polygon ("rectangularity
/// deviation" for quadrilaterals): `0` when every corner is a right angle.
pub fn max_corner_cosine(polygon: &[Point2<i32>]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 1.0;
    }
    (0..n)
        .map(|j| angle_cosine(polygon[j], polygon[(j + 1) % n], polygon[(j + 2) % n]).abs())
        .fold(0.0, f64::max)
}

/// Cross product of `a - o` and `b - o`: positive for a counter-clockwise
/// turn in a y-up frame. Widened so full-range `i32` coordinates cannot
/// overflow.
pub(crate) fn turn(o: Point2<i32>, a: Point2<i32>, b: Point2<i32>) -> i128 {
    let (ox, oy) = (o.x as i128, o.y as i128);
    (a.x as i128 - ox) * (b.y as i128 - oy) - (a.y as i128 - oy) * (b.x as i128 - ox)
}

fn dist(a: Point2<i32>, b: Point2<i32>) -> f64 {
    (b.cast::<f64>() - a.cast::<f64>()).norm()
}

fn line_distance(p: Point2<i32>, a: Point2<i32>, b: Point2<i32>) -> f64 {
    let ab = b.cast::<f64>() - a.cast::<f64>();
    let ap = p.cast::<f64>() - a.cast::<f64>();
    let len = ab.norm();
    if len <= NUMERIC_EPSILON {
        return ap.norm();
    }
    (ab.x * ap.y - ab.y * ap.x).abs() / len
}
