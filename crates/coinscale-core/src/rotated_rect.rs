use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::NUMERIC_EPSILON;

/// Rectangle (or ellipse envelope) described by center, two side lengths,
/// and a rotation.
///
/// `width` is measured along the direction `angle_deg` (degrees,
/// counter-clockwise from the +x axis in image coordinates), `height` along
/// the perpendicular. When the value comes from an ellipse fit, the sides are
/// the full axis lengths of the ellipse, not a literal rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    pub center: Point2<f64>,
    pub width: f64,
    pub height: f64,
    pub angle_deg: f64,
}

impl RotatedRect {
    pub fn new(center: Point2<f64>, width: f64, height: f64, angle_deg: f64) -> Self {
        Self {
            center,
            width,
            height,
            angle_deg,
        }
    }

    /// Longer of the two sides.
    pub fn major(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Shorter of the two sides.
    pub fn minor(&self) -> f64 {
        self.width.min(self.height)
    }

    /// `minor / major`, or `0` when the envelope has collapsed.
    pub fn axis_ratio(&self) -> f64 {
        let major = self.major();
        if major > NUMERIC_EPSILON {
            self.minor() / major
        } else {
            0.0
        }
    }

    /// Area of the ellipse inscribed in this envelope: `π·major·minor / 4`.
    pub fn ellipse_area(&self) -> f64 {
        std::f64::consts::PI * self.major() * self.minor() / 4.0
    }

    /// Area of the rectangle itself.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// The four corners, in cyclic order.
    pub fn points(&self) -> [Point2<f64>; 4] {
        let theta = self.angle_deg.to_radians();
        let u = Vector2::new(theta.cos(), theta.sin()) * (0.5 * self.width);
        let v = Vector2::new(-theta.sin(), theta.cos()) * (0.5 * self.height);
        let c = self.center;
        [c - u - v, c + u - v, c + u + v, c - u + v]
    }
}
