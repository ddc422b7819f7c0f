//! Core types and geometry primitives for coin-referenced metrology.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any image type or edge detector: everything operates on
//! [`Contour`]s (ordered integer pixel boundaries) and the shapes fitted to
//! them.
//!
//! ## API map
//! - [`Contour`], [`ShapeCandidate`]: per-frame boundary data and its scalar
//!   descriptors.
//! - [`contour_area`], [`arc_length`], [`approximate_polygon`], [`is_convex`],
//!   [`angle_cosine`], [`max_corner_cosine`]: polygon primitives.
//! - [`fit_ellipse`], [`min_area_rect`], [`RotatedRect`]: shape fitting.
//! - [`order_corners`], [`Homography`], [`homography_from_4pt`]: plane
//!   rectification.
//! - [`synthetic`]: deterministic contour generators for tests and benches.

mod contour;
mod corners;
mod ellipse;
mod error;
mod homography;
mod logger;
mod min_rect;
mod polygon;
mod rotated_rect;
pub mod synthetic;

pub use contour::{Contour, ShapeCandidate};
pub use corners::order_corners;
pub use ellipse::fit_ellipse;
pub use error::GeometryError;
pub use homography::{homography_from_4pt, Homography};
pub use min_rect::{convex_hull, min_area_rect};
pub use polygon::{
    angle_cosine, approximate_polygon, arc_length, contour_area, is_convex, max_corner_cosine,
};
pub use rotated_rect::RotatedRect;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{default_directive, init_with_level};

/// Guard used before every division by a length, ratio, or scale.
pub const NUMERIC_EPSILON: f64 = f64::EPSILON;
