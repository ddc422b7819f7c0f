//! Default preprocessing: RGB frame to edge mask to external contours.

use image::{GrayImage, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::distance_transform::Norm;
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::EdgePipelineParams;
use crate::core::Contour;

/// Turns a color frame into a binary edge mask (non-zero = edge).
pub trait EdgeDetector {
    fn edge_mask(&self, frame: &RgbImage) -> GrayImage;
}

/// Extracts the outermost boundaries of a binary mask.
pub trait ContourExtractor {
    fn external_contours(&self, mask: &GrayImage) -> Vec<Contour>;
}

/// Grayscale, Gaussian blur, Canny, then L∞ dilation.
#[derive(Clone, Debug, Default)]
pub struct CannyEdgeDetector {
    params: EdgePipelineParams,
}

impl CannyEdgeDetector {
    pub fn new(params: EdgePipelineParams) -> Self {
        Self { params }
    }
}

impl EdgeDetector for CannyEdgeDetector {
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, frame), fields(width = frame.width(), height = frame.height()))
    )]
    fn edge_mask(&self, frame: &RgbImage) -> GrayImage {
        let p = &self.params;
        let gray = image::imageops::grayscale(frame);
        let smoothed = if p.blur_sigma > 0.0 {
            imageproc::filter::gaussian_blur_f32(&gray, p.blur_sigma)
        } else {
            gray
        };
        let edges = imageproc::edges::canny(&smoothed, p.canny_low, p.canny_high);
        if p.dilate_radius > 0 {
            imageproc::morphology::dilate(&edges, Norm::LInf, p.dilate_radius)
        } else {
            edges
        }
    }
}

/// Border following that keeps only top-level outer borders.
#[derive(Clone, Copy, Debug, Default)]
pub struct BorderFollowing;

impl ContourExtractor for BorderFollowing {
    fn external_contours(&self, mask: &GrayImage) -> Vec<Contour> {
        find_contours::<i32>(mask)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| Contour::new(c.points.iter().map(|p| Point2::new(p.x, p.y)).collect()))
            .collect()
    }
}

/// Downscale an edge mask for the debug inset.
pub fn edge_inset(mask: &GrayImage, scale: f64) -> GrayImage {
    let w = ((mask.width() as f64 * scale).round() as u32).max(1);
    let h = ((mask.height() as f64 * scale).round() as u32).max(1);
    image::imageops::resize(mask, w, h, image::imageops::FilterType::Nearest)
}
