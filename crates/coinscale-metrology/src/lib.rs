//! Pinhole-camera metrology from a reference coin.
//!
//! The coin's fitted major axis gives the pixel scale and, through the focal
//! length, the camera distance. The axis compression `minor / major` is the
//! cosine of the viewing tilt. Rectangle sides are converted only with a
//! scale measured in the same frame.

mod constants;
mod measure;

pub use constants::CameraConstants;
pub use measure::{compute_measurements, MeasurementBundle, PixelScale};
