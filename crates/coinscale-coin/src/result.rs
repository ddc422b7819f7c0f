use coinscale_core::{Homography, RotatedRect};
use serde::{Deserialize, Serialize};

/// Best coin of one frame.
///
/// When `found` is false every other field holds its default and must not be
/// read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinResult {
    pub found: bool,
    /// Fitted ellipse as a rotated-rectangle envelope (axis lengths, not a
    /// literal rectangle).
    pub rect: RotatedRect,
    /// Maps the envelope's TL, TR, BR, BL corners onto a `major × major`
    /// square, rectifying the coin plane. `None` when the solve failed.
    pub homography: Option<Homography>,
    /// Fitted ellipse area `π·major·minor / 4` (px²).
    pub area: f64,
}

impl CoinResult {
    pub fn major(&self) -> f64 {
        self.rect.major()
    }

    pub fn minor(&self) -> f64 {
        self.rect.minor()
    }
}
