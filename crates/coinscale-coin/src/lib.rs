//! Reference-coin classifier.
//!
//! Picks at most one coin per frame out of a set of external contours:
//! 1. Reject contours enclosing less than `min_area`.
//! 2. Simplify at `poly_epsilon_frac · perimeter`; keep convex polygons with
//!    at least `min_poly_vertices` vertices (circles do not collapse to few
//!    vertices).
//! 3. Fit an ellipse to the whole contour, then refit on the upper arc only
//!    (points above the first fit's center) when it has enough points.
//! 4. Accept if `minor / major > min_axis_ratio` and the fitted ellipse area
//!    beats the best so far while staying below `max_fit_area`.
//! 5. For every new best, map the fitted envelope's corners onto a square of
//!    side `major` and keep that homography.
//!
//! ```
//! use coinscale_coin::{CoinDetector, CoinDetectorParams};
//! use coinscale_core::synthetic;
//! use nalgebra::Point2;
//!
//! let detector = CoinDetector::new(CoinDetectorParams::default());
//! let contours = vec![synthetic::circle_contour(Point2::new(200.0, 150.0), 40.0)];
//! let coin = detector.detect(&contours);
//! assert!(coin.found);
//! ```

mod detector;
mod params;
mod result;

pub use detector::{rectifying_homography, refine_upper_arc, CoinDetector};
pub use params::CoinDetectorParams;
pub use result::CoinResult;
