//! Logical coordinate frame and the view transform applied inside it.

use serde::Serialize;

use crate::board::BoundingBox;

/// Fixed logical frame: dataset bounds grown by a padding margin on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalFrame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Frame width.
    pub width: f64,
    /// Frame height.
    pub height: f64,
}

impl LogicalFrame {
    /// Builds the frame around `bounds` with `padding` on each side.
    pub fn from_bounds(bounds: &BoundingBox, padding: f64) -> Self {
        Self {
            x: bounds.min_x - padding,
            y: bounds.min_y - padding,
            width: 2.0f64.mul_add(padding, bounds.width()),
            height: 2.0f64.mul_add(padding, bounds.height()),
        }
    }

    /// Geometric center of the frame.
    pub fn center(&self) -> (f64, f64) {
        (self.width.mul_add(0.5, self.x), self.height.mul_add(0.5, self.y))
    }

    /// SVG `viewBox` attribute value.
    pub fn view_box(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// `scale(zoom) · translate(offset)`: a data point `p` maps to `zoom * (p + offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransform {
    /// Uniform scale.
    pub scale: f64,
    /// X translation in data units, applied before scaling.
    pub translate_x: f64,
    /// Y translation in data units, applied before scaling.
    pub translate_y: f64,
}

impl ViewTransform {
    /// Maps a data-space point into frame coordinates.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x + self.translate_x) * self.scale,
            (y + self.translate_y) * self.scale,
        )
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        format!(
            "scale({}) translate({}, {})",
            self.scale, self.translate_x, self.translate_y
        )
    }
}
