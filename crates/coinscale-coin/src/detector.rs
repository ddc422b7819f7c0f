use coinscale_core::{
    fit_ellipse, homography_from_4pt, order_corners, Contour, Homography, RotatedRect,
    ShapeCandidate,
};
use log::{debug, trace, warn};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{CoinDetectorParams, CoinResult};

/// Selects the best coin-like contour of a frame.
#[derive(Clone, Debug, Default)]
pub struct CoinDetector {
    params: CoinDetectorParams,
}

impl CoinDetector {
    pub fn new(params: CoinDetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CoinDetectorParams {
        &self.params
    }

    /// Scan `contours` in order and return the best coin, or a default
    /// (`found = false`) result when nothing qualifies.
    ///
    /// Selection uses strict `>` on the fitted area, so among equal areas the
    /// first contour in input order wins.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, contours), fields(contours = contours.len()))
    )]
    pub fn detect(&self, contours: &[Contour]) -> CoinResult {
        let p = &self.params;
        let mut best = CoinResult::default();
        let mut admitted = 0usize;

        for (idx, contour) in contours.iter().enumerate() {
            let Some(fit) = self.admit(contour) else {
                continue;
            };
            admitted += 1;

            let ratio = fit.axis_ratio();
            let fit_area = fit.ellipse_area();
            if ratio > p.min_axis_ratio && fit_area > best.area && fit_area < p.max_fit_area {
                trace!("contour {idx}: new best coin, area {fit_area:.1}, axis ratio {ratio:.3}");
                best = CoinResult {
                    found: true,
                    rect: fit,
                    homography: rectifying_homography(&fit),
                    area: fit_area,
                };
            }
        }

        debug!(
            "coin: {} contours, {} passed the shape gate, found={}",
            contours.len(),
            admitted,
            best.found
        );
        best
    }

    /// Area, polygon, and convexity gates followed by the refined fit.
    fn admit(&self, contour: &Contour) -> Option<RotatedRect> {
        let p = &self.params;
        let area = contour.area();
        if area < p.min_area {
            return None;
        }
        let shape = ShapeCandidate::describe(contour, area, p.poly_epsilon_frac);
        if shape.vertex_count() < p.min_poly_vertices || !shape.convex {
            return None;
        }
        let initial = match fit_ellipse(&contour.points_f64()) {
            Ok(fit) => fit,
            Err(err) => {
                trace!("ellipse fit failed on a coin-shaped contour: {err}");
                return None;
            }
        };
        Some(refine_upper_arc(contour, initial, p.min_arc_points))
    }
}

/// Refit using only the contour points strictly above `initial`'s center
/// (smaller image y): the upper arc of a coin lying on a surface is the least
/// likely to be occluded or shadowed.
///
/// Keeps `initial` when fewer than `min_points` points qualify or the refit
/// fails.
pub fn refine_upper_arc(contour: &Contour, initial: RotatedRect, min_points: usize) -> RotatedRect {
    let upper: Vec<Point2<f64>> = contour
        .points
        .iter()
        .map(|p| p.cast::<f64>())
        .filter(|p| p.y < initial.center.y)
        .collect();
    if upper.len() < min_points {
        return initial;
    }
    fit_ellipse(&upper).unwrap_or(initial)
}

/// Homography taking the envelope corners (TL, TR, BR, BL) of `fit` onto an
/// axis-aligned `major × major` square at the origin.
pub fn rectifying_homography(fit: &RotatedRect) -> Option<Homography> {
    let src = order_corners(fit.points());
    let s = fit.major();
    let dst = [
        Point2::new(0.0, 0.0),
        Point2::new(s, 0.0),
        Point2::new(s, s),
        Point2::new(0.0, s),
    ];
    let h = homography_from_4pt(&src, &dst);
    if h.is_none() {
        warn!("coin homography solve failed for a degenerate envelope ({fit:?})");
    }
    h
}
