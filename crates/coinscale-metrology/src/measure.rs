use coinscale_coin::CoinResult;
use coinscale_core::NUMERIC_EPSILON;
use coinscale_rect::RectangleResult;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::CameraConstants;

/// Pixels per millimetre on the coin, valid for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelScale(f64);

impl PixelScale {
    /// Scale from a coin fit; `None` without a coin or with a degenerate
    /// major axis.
    pub fn from_coin(coin: &CoinResult, constants: &CameraConstants) -> Option<Self> {
        if !coin.found || constants.coin_diameter_mm <= NUMERIC_EPSILON {
            return None;
        }
        let major = coin.major();
        if major <= NUMERIC_EPSILON {
            return None;
        }
        let scale = major / constants.coin_diameter_mm;
        (scale > NUMERIC_EPSILON).then_some(Self(scale))
    }

    pub fn px_per_mm(self) -> f64 {
        self.0
    }

    pub fn to_mm(self, px: f64) -> f64 {
        px / self.0
    }
}

/// Physical measurements of one frame.
///
/// Zero means "unknown": `distance_mm`/`tilt_deg` without a coin, and
/// `width_mm`/`height_mm` without both a rectangle and a valid scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementBundle {
    pub distance_mm: f64,
    pub tilt_deg: f64,
    /// Short side of the rectangle.
    pub width_mm: f64,
    /// Long side of the rectangle.
    pub height_mm: f64,
    /// Scale used for the rectangle, `None` when no coin was usable.
    pub px_per_mm: Option<f64>,
}

impl MeasurementBundle {
    pub fn has_dimensions(&self) -> bool {
        self.width_mm > 0.0 && self.height_mm > 0.0
    }
}

/// Convert the frame's classifier outputs into millimetres and degrees.
pub fn compute_measurements(
    coin: &CoinResult,
    rect: &RectangleResult,
    constants: &CameraConstants,
) -> MeasurementBundle {
    let mut out = MeasurementBundle::default();

    let Some(scale) = PixelScale::from_coin(coin, constants) else {
        if rect.found {
            debug!("rectangle found without a usable coin scale; size unknown");
        }
        return out;
    };

    let (major, minor) = (coin.major(), coin.minor());
    out.px_per_mm = Some(scale.px_per_mm());
    out.distance_mm = constants.coin_diameter_mm * constants.focal_length_px / major;
    out.tilt_deg = (minor / major).clamp(0.0, 1.0).acos().to_degrees();

    if rect.found {
        let (short_px, long_px) = rect.sides();
        out.width_mm = scale.to_mm(short_px);
        out.height_mm = scale.to_mm(long_px);
    }
    debug!(
        "measurements: distance {:.1} mm, tilt {:.1} deg, size {:.1} x {:.1} mm",
        out.distance_mm, out.tilt_deg, out.width_mm, out.height_mm
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use coinscale_core::RotatedRect;
    use nalgebra::Point2;

    fn coin(width: f64, height: f64) -> CoinResult {
        CoinResult {
            found: true,
            rect: RotatedRect::new(Point2::new(100.0, 100.0), width, height, 0.0),
            homography: None,
            area: std::f64::consts::FRAC_PI_4 * width * height,
        }
    }

    #[test]
    fn circle_has_zero_tilt() {
        let m = compute_measurements(
            &coin(48.0, 48.0),
            &RectangleResult::default(),
            &CameraConstants::default(),
        );
        assert_relative_eq!(m.tilt_deg, 0.0, epsilon = 1e-9);
        assert_relative_eq!(m.distance_mm, 24.0 * 800.0 / 48.0);
        assert_eq!(m.px_per_mm, Some(2.0));
    }

    #[test]
    fn half_compression_is_sixty_degrees() {
        let m = compute_measurements(
            &coin(30.0, 60.0),
            &RectangleResult::default(),
            &CameraConstants::default(),
        );
        assert_relative_eq!(m.tilt_deg, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_coin_gives_no_scale() {
        let c = coin(0.0, 0.0);
        assert!(PixelScale::from_coin(&c, &CameraConstants::default()).is_none());
        let m = compute_measurements(&c, &RectangleResult::default(), &CameraConstants::default());
        assert_eq!(m, MeasurementBundle::default());
    }
}
