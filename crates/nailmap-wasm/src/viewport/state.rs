//! Pan/zoom state and the center-on-focus algorithm.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Dataset;
use crate::config::ViewerConfig;

use super::frame::{LogicalFrame, ViewTransform};

/// Screen position of the last pointer event in an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragAnchor {
    /// Last pointer X in screen pixels.
    pub x: f64,
    /// Last pointer Y in screen pixels.
    pub y: f64,
}

/// Transient camera state for one dataset. Reset, never merged, on reload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    /// Current zoom, always inside the configured range.
    pub zoom: f64,
    /// Pan offset X in data units.
    pub offset_x: f64,
    /// Pan offset Y in data units.
    pub offset_y: f64,
    /// Set between `begin_drag` and `end_drag`.
    pub drag: Option<DragAnchor>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            drag: None,
        }
    }
}

impl ViewportState {
    /// Multiplies the zoom by `factor` and clamps it. Non-finite factors are ignored.
    pub fn zoom_by(&mut self, factor: f64, config: &ViewerConfig) {
        if !factor.is_finite() {
            return;
        }
        self.zoom = config.clamp_zoom(self.zoom * factor);
    }

    /// Discrete zoom-in control.
    pub fn zoom_in(&mut self, config: &ViewerConfig) {
        self.zoom_by(config.zoom_in_step, config);
    }

    /// Discrete zoom-out control.
    pub fn zoom_out(&mut self, config: &ViewerConfig) {
        self.zoom_by(config.zoom_out_step, config);
    }

    /// One wheel tick. Negative `delta_y` (scroll up) zooms in.
    pub fn wheel(&mut self, delta_y: f64, config: &ViewerConfig) {
        if delta_y < 0.0 {
            self.zoom_by(1.0 + config.wheel_step, config);
        } else if delta_y > 0.0 {
            self.zoom_by(1.0 - config.wheel_step, config);
        }
    }

    /// Adds a delta, in data units, to the pan offset.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.offset_x += dx;
            self.offset_y += dy;
        }
    }

    /// Starts a drag gesture at the given screen position.
    ///
    /// A non-finite position starts nothing.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.drag = Some(DragAnchor { x, y });
    }

    /// Pans by the screen delta since the last drag event, divided by zoom.
    ///
    /// Does nothing unless a drag is in progress. Non-finite positions are
    /// dropped and leave the anchor where it was.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        let Some(anchor) = self.drag else {
            return;
        };
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.pan((x - anchor.x) / self.zoom, (y - anchor.y) / self.zoom);
        self.drag = Some(DragAnchor { x, y });
    }

    /// Ends the drag gesture (pointer up or leave).
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Restores zoom 1 and zero offset. This is a fixed default, not a fit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Centers the view on the point with the given id.
    ///
    /// Zoom is raised to at least `focus_zoom` and never lowered. Unknown
    /// ids are a silent no-op. Returns true if the point was found.
    pub fn focus_on(&mut self, dataset: &Dataset, id: &str, config: &ViewerConfig) -> bool {
        let Some(point) = dataset.find(id) else {
            debug!(id, "focus target not in dataset");
            return false;
        };

        let frame = LogicalFrame::from_bounds(&dataset.bounds(), config.padding);
        let (cx, cy) = frame.center();
        let zoom = config.clamp_zoom(self.zoom.max(config.focus_zoom));

        self.zoom = zoom;
        self.offset_x = cx / zoom - point.x;
        self.offset_y = cy / zoom - point.y;
        true
    }

    /// The transform applied inside the logical frame.
    pub const fn transform(&self) -> ViewTransform {
        ViewTransform {
            scale: self.zoom,
            translate_x: self.offset_x,
            translate_y: self.offset_y,
        }
    }
}
