use coinscale_core::{max_corner_cosine, min_area_rect, Contour, ShapeCandidate, NUMERIC_EPSILON};
use log::{debug, trace};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{RectangleDetectorParams, RectanglePolicy, RectangleResult};

/// Selects the largest rectangle-like contour of a frame.
#[derive(Clone, Debug, Default)]
pub struct RectangleDetector {
    params: RectangleDetectorParams,
}

impl RectangleDetector {
    pub fn new(params: RectangleDetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RectangleDetectorParams {
        &self.params
    }

    /// Keep the accepted contour with the largest raw area (first one wins on
    /// ties) and report its minimum-area enclosing rectangle.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, contours), fields(contours = contours.len()))
    )]
    pub fn detect(&self, contours: &[Contour]) -> RectangleResult {
        let mut best: Option<(usize, f64)> = None;
        for (idx, contour) in contours.iter().enumerate() {
            let area = contour.area();
            if area < self.params.min_area {
                continue;
            }
            if !self.accepts(contour, area) {
                continue;
            }
            if best.is_none_or(|(_, a)| area > a) {
                trace!("contour {idx}: new best rectangle, area {area:.0}");
                best = Some((idx, area));
            }
        }

        let Some((idx, area)) = best else {
            debug!("rectangle: none of {} contours accepted", contours.len());
            return RectangleResult::default();
        };
        let rect = min_area_rect(&contours[idx].points);
        debug!(
            "rectangle: contour {idx}, {:.1} x {:.1} px at ({:.1}, {:.1})",
            rect.width, rect.height, rect.center.x, rect.center.y
        );
        RectangleResult {
            found: true,
            rect,
            area,
        }
    }

    fn accepts(&self, contour: &Contour, area: f64) -> bool {
        match self.params.policy {
            RectanglePolicy::CornerAngle { max_cosine } => {
                let shape = ShapeCandidate::describe(contour, area, self.params.poly_epsilon_frac);
                shape.vertex_count() == 4
                    && shape.convex
                    && max_corner_cosine(&shape.polygon) < max_cosine
            }
            RectanglePolicy::FillRatio { min_fill } => {
                let rect_area = min_area_rect(&contour.points).area();
                rect_area > NUMERIC_EPSILON && area / rect_area > min_fill
            }
        }
    }
}
