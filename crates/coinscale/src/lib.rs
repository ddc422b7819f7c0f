//! Coin-referenced single-camera metrology.
//!
//! A coin of known diameter lying in the scene sets the pixel scale of each
//! frame. From it the camera distance and viewing tilt follow, and the size
//! of a rectangular object (a phone, a card) next to it can be measured.
//!
//! This crate provides:
//! - re-exports of the geometry, classifier, and metrology crates
//! - [`MetrologyConfig`], the single immutable run configuration
//! - [`scene`]: render commands describing an annotated frame
//! - (feature `image`) [`pipeline`], a default Canny edge mask and contour
//!   extractor, and [`app`], frame sources and the per-frame orchestrator
//!
//! ## Quickstart
//!
//! ```no_run
//! use coinscale::app::{ImageSequence, MetrologyApp};
//! use coinscale::MetrologyConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ImageSequence::from_inputs(&["frames/"])?;
//! let mut app = MetrologyApp::new(source, MetrologyConfig::default());
//! app.run(|report, _mask| {
//!     println!("{}: {:.1} mm away", report.index, report.measurements.distance_mm);
//!     Ok(())
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `coinscale::core`: contours, fitting primitives, homographies.
//! - `coinscale::coin`: reference-coin classifier.
//! - `coinscale::rect`: rectangle classifier.
//! - `coinscale::metrology`: pixel scale, distance, tilt, size.

pub use coinscale_coin as coin;
pub use coinscale_core as core;
pub use coinscale_metrology as metrology;
pub use coinscale_rect as rect;

pub use coinscale_coin::{CoinDetector, CoinDetectorParams, CoinResult};
pub use coinscale_core::{Contour, Homography, RotatedRect};
pub use coinscale_metrology::{compute_measurements, CameraConstants, MeasurementBundle};
pub use coinscale_rect::{RectangleDetector, RectangleDetectorParams, RectanglePolicy, RectangleResult};

mod config;
mod error;
pub mod scene;

#[cfg(feature = "image")]
pub mod app;
#[cfg(feature = "image")]
pub mod pipeline;

pub use config::{AcquisitionParams, CaptureParams, EdgePipelineParams, MetrologyConfig};
pub use error::ConfigError;
#[cfg(feature = "image")]
pub use error::{AcquisitionError, AppError};

/// Install logging for an application: the `tracing` subscriber (with `log`
/// records bridged into it) when that feature is on, the plain stderr logger
/// otherwise. `level` applies to both unless `RUST_LOG` overrides the
/// subscriber's filter.
pub fn init_logging(level: log::LevelFilter) {
    #[cfg(feature = "tracing")]
    {
        coinscale_core::init_tracing(false, level);
        let _ = tracing_log::LogTracer::init();
        log::set_max_level(level);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = coinscale_core::init_with_level(level);
    }
}
