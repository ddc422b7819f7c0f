use serde::{Deserialize, Serialize};

/// Fixed physical and camera constants for one run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConstants {
    /// Real diameter of the reference coin in millimetres.
    pub coin_diameter_mm: f64,
    /// Focal length of the camera in pixels.
    pub focal_length_px: f64,
}

impl Default for CameraConstants {
    fn default() -> Self {
        Self {
            coin_diameter_mm: 24.0,
            focal_length_px: 800.0,
        }
    }
}
