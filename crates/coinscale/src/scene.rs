//! Render commands for one annotated frame.
//!
//! Drawing itself is left to the caller; this module only decides *what* to
//! draw: the coin ellipse with its distance and tilt, the rectangle outline
//! with its size, and a quarter-scale edge-mask inset in the top-left corner.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::coin::CoinResult;
use crate::core::RotatedRect;
use crate::metrology::MeasurementBundle;
use crate::rect::RectangleResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const COIN_COLOR: Color = Color::rgb(255, 255, 0);
pub const RECTANGLE_COLOR: Color = Color::rgb(0, 255, 0);
pub const DEBUG_COLOR: Color = Color::rgb(255, 0, 0);

/// Scale of the edge-mask inset relative to the frame.
pub const INSET_SCALE: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    /// Small sans-serif.
    Plain,
    /// Normal-size sans-serif.
    Simplex,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneCommand {
    /// Ellipse inscribed in `rect`.
    Ellipse {
        rect: RotatedRect,
        color: Color,
        thickness: u32,
    },
    /// Closed polyline.
    Polygon {
        points: Vec<Point2<f64>>,
        color: Color,
        thickness: u32,
    },
    /// Text whose baseline starts at `origin`.
    Label {
        text: String,
        origin: Point2<f64>,
        font: Font,
        font_scale: f64,
        color: Color,
        thickness: u32,
    },
    /// Edge mask downscaled by `scale`, pasted with its top-left at `origin`.
    EdgeInset {
        origin: Point2<u32>,
        width: u32,
        height: u32,
        scale: f64,
    },
}

/// Commands annotating one frame of `frame_size` (width, height).
///
/// `edge_mask_size` is the size of the edge mask, `None` when there is none;
/// the inset is skipped when it would not fit, but its caption is always
/// drawn.
pub fn compose_scene(
    coin: &CoinResult,
    rect: &RectangleResult,
    m: &MeasurementBundle,
    frame_size: (u32, u32),
    edge_mask_size: Option<(u32, u32)>,
) -> Vec<SceneCommand> {
    let mut out = Vec::new();

    if coin.found {
        out.push(SceneCommand::Ellipse {
            rect: coin.rect,
            color: COIN_COLOR,
            thickness: 2,
        });
        let c = coin.rect.center;
        out.push(coin_label(format!("Tilt: {:.1} deg", m.tilt_deg), c + Vector2::new(0.0, 45.0)));
        out.push(coin_label(format!("Dist: {:.1}mm", m.distance_mm), c + Vector2::new(0.0, 25.0)));
    }

    if rect.found {
        out.push(SceneCommand::Polygon {
            points: rect.rect.points().to_vec(),
            color: RECTANGLE_COLOR,
            thickness: 3,
        });
        if m.has_dimensions() {
            let c = rect.rect.center;
            for (prefix, value, dy) in [("W", m.width_mm, -10.0), ("H", m.height_mm, 25.0)] {
                out.push(SceneCommand::Label {
                    text: format!("{prefix}: {value:.1}mm"),
                    origin: c + Vector2::new(0.0, dy),
                    font: Font::Simplex,
                    font_scale: 0.8,
                    color: RECTANGLE_COLOR,
                    thickness: 2,
                });
            }
        }
    }

    if let Some((mw, mh)) = edge_mask_size {
        let width = (mw as f64 * INSET_SCALE).round() as u32;
        let height = (mh as f64 * INSET_SCALE).round() as u32;
        if width > 0 && height > 0 && width <= frame_size.0 && height <= frame_size.1 {
            out.push(SceneCommand::EdgeInset {
                origin: Point2::new(0, 0),
                width,
                height,
                scale: INSET_SCALE,
            });
        }
        out.push(SceneCommand::Label {
            text: "Canny Edge".to_string(),
            origin: Point2::new(5.0, 15.0),
            font: Font::Plain,
            font_scale: 1.0,
            color: DEBUG_COLOR,
            thickness: 1,
        });
    }

    out
}

fn coin_label(text: String, origin: Point2<f64>) -> SceneCommand {
    SceneCommand::Label {
        text,
        origin,
        font: Font::Plain,
        font_scale: 1.2,
        color: COIN_COLOR,
        thickness: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(cmds: &[SceneCommand]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                SceneCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn coin() -> CoinResult {
        CoinResult {
            found: true,
            rect: RotatedRect::new(Point2::new(100.0, 200.0), 48.0, 40.0, 0.0),
            homography: None,
            area: 1500.0,
        }
    }

    fn phone() -> RectangleResult {
        RectangleResult {
            found: true,
            rect: RotatedRect::new(Point2::new(400.0, 300.0), 140.0, 300.0, 0.0),
            area: 42_000.0,
        }
    }

    #[test]
    fn coin_labels_sit_below_its_center() {
        let m = MeasurementBundle {
            distance_mm: 400.0,
            tilt_deg: 33.557,
            ..MeasurementBundle::default()
        };
        let cmds = compose_scene(&coin(), &RectangleResult::default(), &m, (640, 480), None);
        assert!(matches!(cmds[0], SceneCommand::Ellipse { thickness: 2, .. }));
        assert_eq!(texts(&cmds), ["Tilt: 33.6 deg", "Dist: 400.0mm"]);
        match &cmds[2] {
            SceneCommand::Label { origin, .. } => assert_eq!(*origin, Point2::new(100.0, 225.0)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rectangle_dimensions_need_a_scale() {
        let unknown = compose_scene(
            &CoinResult::default(),
            &phone(),
            &MeasurementBundle::default(),
            (640, 480),
            None,
        );
        assert_eq!(unknown.len(), 1);
        assert!(texts(&unknown).is_empty());

        let m = MeasurementBundle {
            width_mm: 70.0,
            height_mm: 150.04,
            px_per_mm: Some(2.0),
            ..MeasurementBundle::default()
        };
        let known = compose_scene(&coin(), &phone(), &m, (640, 480), None);
        let t = texts(&known);
        assert!(t.contains(&"W: 70.0mm"));
        assert!(t.contains(&"H: 150.0mm"));
    }

    #[test]
    fn inset_is_quarter_scale_and_captioned() {
        let cmds = compose_scene(
            &CoinResult::default(),
            &RectangleResult::default(),
            &MeasurementBundle::default(),
            (1920, 1080),
            Some((1920, 1080)),
        );
        assert_eq!(
            cmds[0],
            SceneCommand::EdgeInset {
                origin: Point2::new(0, 0),
                width: 480,
                height: 270,
                scale: 0.25,
            }
        );
        assert_eq!(texts(&cmds), ["Canny Edge"]);
    }

    #[test]
    fn commands_serialise_with_a_kind_tag() {
        let cmds = compose_scene(
            &coin(),
            &RectangleResult::default(),
            &MeasurementBundle::default(),
            (640, 480),
            None,
        );
        let v = serde_json::to_value(&cmds).unwrap();
        assert_eq!(v[0]["kind"], "ellipse");
        assert_eq!(v[1]["font"], "plain");
    }
}
