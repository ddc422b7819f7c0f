//! Rectangle (phone) classifier.
//!
//! Two acceptance policies are available through [`RectanglePolicy`]:
//! - `CornerAngle` (default): the contour must simplify at
//!   `poly_epsilon_frac · perimeter` to a convex quadrilateral whose largest
//!   absolute corner cosine stays below `max_cosine`. Rejects trapezoids,
//!   diamonds and skewed quads while tolerating mild perspective.
//! - `FillRatio`: the contour must fill more than `min_fill` of its
//!   minimum-area rectangle. Tolerates rounded corners but discriminates less.
//!
//! Among accepted contours the one with the largest raw area wins, and its
//! minimum-area enclosing rectangle is reported.

mod detector;
mod params;
mod result;

pub use detector::RectangleDetector;
pub use params::{RectangleDetectorParams, RectanglePolicy};
pub use result::RectangleResult;
