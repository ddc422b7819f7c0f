use serde::{Deserialize, Serialize};

/// Admission and selection thresholds for the coin classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinDetectorParams {
    /// Contours enclosing less than this many px² are rejected before any
    /// fitting.
    pub min_area: f64,
    /// Exclusive upper bound on the fitted ellipse area (px²). Rejects table
    /// edges and other large round-ish outlines.
    pub max_fit_area: f64,
    /// Exclusive lower bound on `minor / major` of the refined fit.
    pub min_axis_ratio: f64,
    /// Polygon simplification tolerance as a fraction of the perimeter.
    pub poly_epsilon_frac: f64,
    /// Minimal vertex count of the simplified polygon.
    pub min_poly_vertices: usize,
    /// Minimal number of upper-arc points needed to refit.
    pub min_arc_points: usize,
}

impl Default for CoinDetectorParams {
    fn default() -> Self {
        Self {
            min_area: 500.0,
            max_fit_area: 50_000.0,
            min_axis_ratio: 0.2,
            poly_epsilon_frac: 0.02,
            min_poly_vertices: 7,
            min_arc_points: 6,
        }
    }
}
