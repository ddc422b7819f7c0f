//! Run configuration.
//!
//! Every section carries `#[serde(default)]`, so a JSON file only needs the
//! keys it changes:
//!
//! ```
//! use coinscale::MetrologyConfig;
//!
//! let cfg: MetrologyConfig =
//!     serde_json::from_str(r#"{ "camera": { "focal_length_px": 85.0 } }"#).unwrap();
//! assert_eq!(cfg.camera.focal_length_px, 85.0);
//! assert_eq!(cfg.camera.coin_diameter_mm, 24.0);
//! assert!(cfg.validate().is_ok());
//! ```

use std::cmp::Ordering;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coin::CoinDetectorParams;
use crate::metrology::CameraConstants;
use crate::rect::{RectangleDetectorParams, RectanglePolicy};
use crate::ConfigError;

/// Edge-mask preprocessing: grayscale, Gaussian blur, Canny, dilation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgePipelineParams {
    /// Gaussian sigma in pixels; `0` disables the blur.
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// L∞ dilation radius closing small gaps in the edges; `0` disables it.
    pub dilate_radius: u8,
}

impl Default for EdgePipelineParams {
    fn default() -> Self {
        Self {
            blur_sigma: 2.0,
            canny_low: 30.0,
            canny_high: 100.0,
            dilate_radius: 1,
        }
    }
}

/// Frame read policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionParams {
    /// Consecutive failed reads tolerated before giving up.
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub backoff_factor: f64,
    /// Reads slower than this are dropped as timed out; `0` disables the
    /// check.
    pub read_timeout_ms: u64,
}

impl Default for AcquisitionParams {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 50,
            backoff_factor: 2.0,
            read_timeout_ms: 2000,
        }
    }
}

impl AcquisitionParams {
    /// Wait before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1) as i32;
        let ms = self.initial_backoff_ms as f64 * self.backoff_factor.powi(exp);
        Duration::from_millis(ms.clamp(0.0, u64::MAX as f64) as u64)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }
}

/// Nominal capture resolution. Frames of other sizes are still processed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureParams {
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Immutable configuration shared by every component of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetrologyConfig {
    pub camera: CameraConstants,
    pub coin: CoinDetectorParams,
    pub rectangle: RectangleDetectorParams,
    pub edges: EdgePipelineParams,
    pub acquisition: AcquisitionParams,
    pub capture: CaptureParams,
}

impl MetrologyConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !positive(self.camera.coin_diameter_mm) {
            return invalid(format!(
                "camera.coin_diameter_mm must be positive, got {}",
                self.camera.coin_diameter_mm
            ));
        }
        if !positive(self.camera.focal_length_px) {
            return invalid(format!(
                "camera.focal_length_px must be positive, got {}",
                self.camera.focal_length_px
            ));
        }
        let coin = &self.coin;
        if !open_unit(coin.min_axis_ratio) {
            return invalid(format!(
                "coin.min_axis_ratio must be in (0, 1), got {}",
                coin.min_axis_ratio
            ));
        }
        if coin.min_area.partial_cmp(&coin.max_fit_area) != Some(Ordering::Less) {
            return invalid(format!(
                "coin.min_area ({}) must be below coin.max_fit_area ({})",
                coin.min_area, coin.max_fit_area
            ));
        }
        match self.rectangle.policy {
            RectanglePolicy::CornerAngle { max_cosine } if !open_unit(max_cosine) => {
                return invalid(format!("rectangle.policy.max_cosine must be in (0, 1), got {max_cosine}"));
            }
            RectanglePolicy::FillRatio { min_fill } if !(positive(min_fill) && min_fill <= 1.0) => {
                return invalid(format!(
                    "rectangle.policy.min_fill must be in (0, 1], got {min_fill}"
                ));
            }
            _ => {}
        }
        if self.edges.canny_low > self.edges.canny_high {
            return invalid(format!(
                "edges.canny_low ({}) must not exceed edges.canny_high ({})",
                self.edges.canny_low, self.edges.canny_high
            ));
        }
        if self.acquisition.backoff_factor.is_nan() || self.acquisition.backoff_factor < 1.0 {
            return invalid(format!(
                "acquisition.backoff_factor must be at least 1, got {}",
                self.acquisition.backoff_factor
            ));
        }
        Ok(())
    }
}

fn positive(v: f64) -> bool {
    v > 0.0
}

fn open_unit(v: f64) -> bool {
    v > 0.0 && v < 1.0
}
