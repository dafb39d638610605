//! Viewer engine constants, overridable from the host page.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable constants for the viewport and renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Lower zoom clamp.
    pub min_zoom: f64,
    /// Upper zoom clamp.
    pub max_zoom: f64,
    /// Zoom level that focusing raises the view to.
    pub focus_zoom: f64,
    /// Factor applied by the zoom-in control.
    pub zoom_in_step: f64,
    /// Factor applied by the zoom-out control.
    pub zoom_out_step: f64,
    /// Fractional zoom change per wheel tick.
    pub wheel_step: f64,
    /// Margin added around the dataset bounds, in data units.
    pub padding: f64,
    /// Point radius at zoom 1, in data units.
    pub base_radius: f64,
    /// Radius multiplier for the focused point.
    pub active_radius_scale: f64,
    /// Fill color of the focused point.
    pub highlight_color: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.05,
            max_zoom: 100.0,
            focus_zoom: 10.0,
            zoom_in_step: 1.5,
            zoom_out_step: 0.7,
            wheel_step: 0.1,
            padding: 10.0,
            base_radius: 2.0,
            active_radius_scale: 2.5,
            highlight_color: "#ff1744".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Checks that every constant is finite and inside its allowed interval.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite())
            || self.min_zoom <= 0.0
            || self.min_zoom > self.max_zoom
        {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }

        check_step("focus zoom", self.focus_zoom, |v| v > 0.0)?;
        check_step("zoom-in", self.zoom_in_step, |v| v > 1.0)?;
        check_step("zoom-out", self.zoom_out_step, |v| v > 0.0 && v < 1.0)?;
        check_step("wheel", self.wheel_step, |v| v > 0.0 && v < 1.0)?;

        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConfigError::InvalidPadding(self.padding));
        }

        check_radius("base radius", self.base_radius)?;
        check_radius("active radius scale", self.active_radius_scale)?;

        Ok(())
    }

    /// Clamps a zoom level into `[min_zoom, max_zoom]`.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

fn check_step(name: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> Result<(), ConfigError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidStep { name, value })
    }
}

fn check_radius(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius { name, value })
    }
}
