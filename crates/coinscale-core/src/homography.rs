use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};
use serde::{Deserialize, Serialize};

use crate::Contour;

/// Planar projective map `dst ~ H · src`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let v = self.h * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v[0] / v[2], v[1] / v[2])
    }

    /// Map every contour point, e.g. to express another detected shape in
    /// the rectified coin plane.
    pub fn apply_contour(&self, contour: &Contour) -> Vec<Point2<f64>> {
        contour
            .points
            .iter()
            .map(|p| self.apply(p.cast::<f64>()))
            .collect()
    }
}

/// Translate to the centroid and scale so the mean distance is √2.
fn hartley(pts: &[Point2<f64>]) -> (Vec<Point2<f64>>, Matrix3<f64>) {
    let n = pts.len() as f64;
    let cx = pts.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = pts.iter().map(|p| p.y).sum::<f64>() / n;
    let mean_dist = pts
        .iter()
        .map(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt())
        .sum::<f64>()
        / n;
    let s = if mean_dist > 1e-12 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);
    let out = pts
        .iter()
        .map(|p| Point2::new(s * (p.x - cx), s * (p.y - cy)))
        .collect();
    (out, t)
}

fn denormalize(hn: Matrix3<f64>, t_src: Matrix3<f64>, t_dst: Matrix3<f64>) -> Option<Homography> {
    let h = t_dst.try_inverse()? * hn * t_src;
    let s = h[(2, 2)];
    if s.abs() < 1e-12 || !h.iter().all(|v| v.is_finite()) {
        return None;
    }
    Some(Homography::new(h / s))
}

/// Compute H such that `dst ~ H · src` from exactly four correspondences.
///
/// Corner order must be consistent between `src` and `dst`. Returns `None`
/// for singular configurations (e.g. three collinear corners).
pub fn homography_from_4pt(src: &[Point2<f64>; 4], dst: &[Point2<f64>; 4]) -> Option<Homography> {
    // Unknowns: [h11 h12 h13 h21 h22 h23 h31 h32], with h33 = 1
    // h11 x + h12 y + h13 - u h31 x - u h32 y = u
    // h21 x + h22 y + h23 - v h31 x - v h32 y = v
    let (src_n, t_src) = hartley(src);
    let (dst_n, t_dst) = hartley(dst);

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for k in 0..4 {
        let (x, y) = (src_n[k].x, src_n[k].y);
        let (u, v) = (dst_n[k].x, dst_n[k].y);

        let r0 = 2 * k;
        a[(r0, 0)] = x;
        a[(r0, 1)] = y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -u * x;
        a[(r0, 7)] = -u * y;
        b[r0] = u;

        let r1 = 2 * k + 1;
        a[(r1, 3)] = x;
        a[(r1, 4)] = y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -v * x;
        a[(r1, 7)] = -v * y;
        b[r1] = v;
    }

    let x = a.lu().solve(&b)?;
    let hn = Matrix3::new(
        x[0], x[1], x[2], //
        x[3], x[4], x[5], //
        x[6], x[7], 1.0,
    );
    denormalize(hn, t_src, t_dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point2<f64>, b: Point2<f64>, tol: f64) {
        assert!(
            (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol,
            "expected ({:.6},{:.6}) ~ ({:.6},{:.6}) within {}",
            a.x,
            a.y,
            b.x,
            b.y,
            tol
        );
    }

    #[test]
    fn ellipse_envelope_maps_onto_square() {
        // a foreshortened coin envelope, TL TR BR BL
        let src = [
            Point2::new(100.0, 200.0),
            Point2::new(160.0, 200.0),
            Point2::new(160.0, 230.0),
            Point2::new(100.0, 230.0),
        ];
        let s = 60.0;
        let dst = [
            Point2::new(0.0, 0.0),
            Point2::new(s, 0.0),
            Point2::new(s, s),
            Point2::new(0.0, s),
        ];
        let h = homography_from_4pt(&src, &dst).expect("solvable");
        for (p, q) in src.iter().zip(dst.iter()) {
            assert_close(h.apply(*p), *q, 1e-6);
        }
        assert_close(h.apply(Point2::new(130.0, 215.0)), Point2::new(30.0, 30.0), 1e-6);
    }

    #[test]
    fn collapsed_corners_are_rejected() {
        let p = Point2::new(5.0, 5.0);
        let dst = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert!(homography_from_4pt(&[p; 4], &dst).is_none());
    }

    #[test]
    fn contour_points_follow_the_map() {
        let shift = Homography::new(Matrix3::new(
            2.0, 0.0, 10.0, //
            0.0, 2.0, -4.0, //
            0.0, 0.0, 1.0,
        ));
        let contour = Contour::from_xy(&[(0, 0), (3, 1), (-2, 5)]);
        let mapped = shift.apply_contour(&contour);
        assert_eq!(mapped.len(), 3);
        assert_close(mapped[1], Point2::new(16.0, -2.0), 1e-12);
        assert_close(mapped[2], Point2::new(6.0, 6.0), 1e-12);
    }
}
