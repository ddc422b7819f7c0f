use serde::{Deserialize, Serialize};

/// Acceptance test applied to each rectangle candidate. Exactly one is active
/// per detector; the two are not interchangeable on the same data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RectanglePolicy {
    /// Simplify to a convex quadrilateral and bound the largest absolute
    /// corner cosine.
    CornerAngle { max_cosine: f64 },
    /// Skip simplification; require `contour_area / min_area_rect_area` above
    /// `min_fill`. Tolerates rounded corners.
    FillRatio { min_fill: f64 },
}

impl Default for RectanglePolicy {
    fn default() -> Self {
        Self::CornerAngle { max_cosine: 0.2 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleDetectorParams {
    /// Contours enclosing less than this many px² are rejected outright.
    pub min_area: f64,
    /// Polygon simplification tolerance as a fraction of the perimeter
    /// (`CornerAngle` only).
    pub poly_epsilon_frac: f64,
    pub policy: RectanglePolicy,
}

impl Default for RectangleDetectorParams {
    fn default() -> Self {
        Self {
            min_area: 50_000.0,
            poly_epsilon_frac: 0.02,
            policy: RectanglePolicy::default(),
        }
    }
}
