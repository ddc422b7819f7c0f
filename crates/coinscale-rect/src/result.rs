use coinscale_core::RotatedRect;
use serde::{Deserialize, Serialize};

/// Best rectangle of one frame. Fields other than `found` are defaults when
/// nothing was accepted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectangleResult {
    pub found: bool,
    /// Minimum-area enclosing rectangle of the winning contour.
    pub rect: RotatedRect,
    /// Raw contour area (px²) used for selection.
    pub area: f64,
}

impl RectangleResult {
    /// Side lengths as `(short, long)` in pixels.
    pub fn sides(&self) -> (f64, f64) {
        (self.rect.minor(), self.rect.major())
    }
}
