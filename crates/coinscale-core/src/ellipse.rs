//! Direct least-squares ellipse fit (Fitzgibbon, Pilu & Fisher, 1999).
//!
//! The conic `A x² + B xy + C y² + D x + E y + F = 0` is fitted on
//! centroid-shifted, scaled coordinates, with the ellipse constraint
//! `4AC − B² > 0` enforced through the reduced 3×3 eigenproblem.

use nalgebra::{DMatrix, Matrix3, Point2, Vector3};

use crate::{GeometryError, RotatedRect};

const MIN_POINTS: usize = 6;

/// Fit an ellipse to at least 6 points and report it as a rotated-rectangle
/// envelope (full axis lengths, angle of the `width` axis in degrees).
pub fn fit_ellipse(points: &[Point2<f64>]) -> Result<RotatedRect, GeometryError> {
    let n = points.len();
    if n < MIN_POINTS {
        return Err(GeometryError::TooFewPoints {
            needed: MIN_POINTS,
            got: n,
        });
    }

    let (mx, my, scale) = normalization(points);

    let mut quad = DMatrix::<f64>::zeros(n, 3);
    let mut lin = DMatrix::<f64>::zeros(n, 3);
    for (i, p) in points.iter().enumerate() {
        let x = (p.x - mx) * scale;
        let y = (p.y - my) * scale;
        quad[(i, 0)] = x * x;
        quad[(i, 1)] = x * y;
        quad[(i, 2)] = y * y;
        lin[(i, 0)] = x;
        lin[(i, 1)] = y;
        lin[(i, 2)] = 1.0;
    }

    let s1: Matrix3<f64> = (quad.transpose() * &quad).fixed_view::<3, 3>(0, 0).into_owned();
    let s2: Matrix3<f64> = (quad.transpose() * &lin).fixed_view::<3, 3>(0, 0).into_owned();
    let s3: Matrix3<f64> = (lin.transpose() * &lin).fixed_view::<3, 3>(0, 0).into_owned();

    let s3_inv = s3
        .try_inverse()
        .ok_or(GeometryError::Degenerate("collinear points"))?;
    let t = -s3_inv * s2.transpose();
    let reduced = s1 + s2 * t;

    // C1⁻¹ for C1 = [[0, 0, 2], [0, -1, 0], [2, 0, 0]]
    let c1_inv = Matrix3::new(0.0, 0.0, 0.5, 0.0, -1.0, 0.0, 0.5, 0.0, 0.0);
    let system = c1_inv * reduced;

    let a1 = constrained_eigenvector(&system).ok_or(GeometryError::NotAnEllipse)?;
    let a2 = t * a1;

    let coeffs = denormalize(
        [a1[0], a1[1], a1[2], a2[0], a2[1], a2[2]],
        mx,
        my,
        scale,
    );
    conic_to_rect(coeffs)
}

fn normalization(points: &[Point2<f64>]) -> (f64, f64, f64) {
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let my = points.iter().map(|p| p.y).sum::<f64>() / n;
    let mean_dist = points
        .iter()
        .map(|p| ((p.x - mx).powi(2) + (p.y - my).powi(2)).sqrt())
        .sum::<f64>()
        / n;
    let scale = if mean_dist > 1e-12 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    (mx, my, scale)
}

/// Eigenvector of `system` satisfying `4 v0 v2 − v1² > 0`; among several,
/// the one with the smallest |eigenvalue|.
fn constrained_eigenvector(system: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let m = system;
    let trace = m.trace();
    let minors = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)] + m[(0, 0)] * m[(2, 2)]
        - m[(0, 2)] * m[(2, 0)]
        + m[(1, 1)] * m[(2, 2)]
        - m[(1, 2)] * m[(2, 1)];
    let det = m.determinant();

    let mut best: Option<(f64, Vector3<f64>)> = None;
    for ev in real_cubic_roots(-trace, minors, -det) {
        let Some(v) = null_vector(&(m - Matrix3::identity() * ev)) else {
            continue;
        };
        if 4.0 * v[0] * v[2] - v[1] * v[1] <= 0.0 {
            continue;
        }
        if best.as_ref().is_none_or(|(b, _)| ev.abs() < *b) {
            best = Some((ev.abs(), v));
        }
    }
    best.map(|(_, v)| v)
}

/// Null vector of a rank-2 3×3 matrix: the largest row of its adjugate.
fn null_vector(m: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let rows = [
        m.row(1).transpose().cross(&m.row(2).transpose()),
        m.row(2).transpose().cross(&m.row(0).transpose()),
        m.row(0).transpose().cross(&m.row(1).transpose()),
    ];
    let best = rows
        .iter()
        .max_by(|a, b| a.norm_squared().total_cmp(&b.norm_squared()))?;
    let norm = best.norm();
    (norm > 1e-15).then(|| best / norm)
}

/// Real roots of `x³ + b x² + c x + d`.
fn real_cubic_roots(b: f64, c: f64, d: f64) -> Vec<f64> {
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;
    let shift = -b / 3.0;
    let disc = -4.0 * p * p * p - 27.0 * q * q;

    if disc >= 0.0 {
        let r = (-p / 3.0).max(0.0).sqrt();
        let cos_arg = if r < 1e-15 {
            0.0
        } else {
            (-q / (2.0 * r * r * r)).clamp(-1.0, 1.0)
        };
        let theta = cos_arg.acos();
        (0..3)
            .map(|k| {
                2.0 * r * ((theta + std::f64::consts::TAU * k as f64) / 3.0).cos() + shift
            })
            .collect()
    } else {
        let s = (q * q / 4.0 + p * p * p / 27.0).sqrt();
        vec![(-q / 2.0 + s).cbrt() + (-q / 2.0 - s).cbrt() + shift]
    }
}

/// Undo `x' = s(x − mx)`, `y' = s(y − my)` on the conic coefficients.
fn denormalize(c: [f64; 6], mx: f64, my: f64, s: f64) -> [f64; 6] {
    let [a, b, cc, d, e, f] = c;
    let s2 = s * s;
    [
        a * s2,
        b * s2,
        cc * s2,
        -2.0 * a * s2 * mx - b * s2 * my + d * s,
        -b * s2 * mx - 2.0 * cc * s2 * my + e * s,
        a * s2 * mx * mx + b * s2 * mx * my + cc * s2 * my * my - d * s * mx - e * s * my + f,
    ]
}

fn conic_to_rect([a, b, c, d, e, f]: [f64; 6]) -> Result<RotatedRect, GeometryError> {
    let denom = 4.0 * a * c - b * b;
    if denom <= 0.0 {
        return Err(GeometryError::NotAnEllipse);
    }
    let cx = (b * e - 2.0 * c * d) / denom;
    let cy = (b * d - 2.0 * a * e) / denom;

    let theta = 0.5 * b.atan2(a - c);
    let sum = a + c;
    let diff = ((a - c).powi(2) + b * b).sqrt();
    let lambda_u = 0.5 * (sum + diff);
    let lambda_v = 0.5 * (sum - diff);

    let f_center = a * cx * cx + b * cx * cy + c * cy * cy + d * cx + e * cy + f;
    let semi_u2 = -f_center / lambda_u;
    let semi_v2 = -f_center / lambda_v;
    if !(semi_u2 > 0.0 && semi_v2 > 0.0) {
        return Err(GeometryError::NotAnEllipse);
    }

    let rect = RotatedRect::new(
        Point2::new(cx, cy),
        2.0 * semi_u2.sqrt(),
        2.0 * semi_v2.sqrt(),
        theta.to_degrees(),
    );
    let finite = rect.center.x.is_finite()
        && rect.center.y.is_finite()
        && rect.width.is_finite()
        && rect.height.is_finite();
    if finite {
        Ok(rect)
    } else {
        Err(GeometryError::Degenerate("non-finite ellipse"))
    }
}
