//! Pure display model: everything the page needs to draw one frame.

use serde::Serialize;

use crate::board::{Dataset, TestPoint};
use crate::config::ViewerConfig;
use crate::navigation::SearchState;

use super::frame::{LogicalFrame, ViewTransform};
use super::state::ViewportState;

/// Exponent of the radius power law. Points shrink slower than `1 / zoom`.
pub const RADIUS_EXPONENT: f64 = -0.3;

/// One point as it should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Point id.
    pub id: String,
    /// X in data units (the transform is applied by the page).
    pub x: f64,
    /// Y in data units.
    pub y: f64,
    /// Radius in data units.
    pub radius: f64,
    /// Fill color.
    pub color: String,
    /// True for the focused point.
    pub active: bool,
}

/// Snapshot of the whole view for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModel {
    /// Fixed logical frame (SVG view box).
    pub frame: LogicalFrame,
    /// `frame` as an SVG `viewBox` value.
    pub view_box: String,
    /// Transform applied inside the frame.
    pub transform: ViewTransform,
    /// `transform` as an SVG `transform` attribute value.
    pub svg_transform: String,
    /// Current zoom.
    pub zoom: f64,
    /// Markers in dataset order.
    pub markers: Vec<Marker>,
    /// Number of points matching the current query.
    pub match_count: usize,
    /// Selected match index, if a cycle step has happened.
    pub active_index: Option<usize>,
    /// Focused point id, if any.
    pub active_id: Option<String>,
}

/// Radius for a non-focused point at the given zoom.
pub fn point_radius(zoom: f64, config: &ViewerConfig) -> f64 {
    config.base_radius * zoom.powf(RADIUS_EXPONENT)
}

/// Deterministic color for a type code.
pub fn type_color(type_code: &str) -> String {
    let hash = type_code
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    format!("hsl({}, 70%, 50%)", hash % 360)
}

/// Builds the display model. Returns `None` when no dataset is loaded.
pub fn render(
    dataset: Option<&Dataset>,
    viewport: &ViewportState,
    search: &SearchState,
    config: &ViewerConfig,
) -> Option<DisplayModel> {
    let dataset = dataset?;
    let radius = point_radius(viewport.zoom, config);
    let active_id = search.focus().map(str::to_string);

    let mut focus_taken = false;
    let markers = dataset
        .points()
        .iter()
        .map(|point| {
            let active = !focus_taken && active_id.as_deref() == Some(point.id.as_str());
            focus_taken |= active;
            marker(point, active, radius, config)
        })
        .collect();

    let frame = LogicalFrame::from_bounds(&dataset.bounds(), config.padding);
    let transform = viewport.transform();
    Some(DisplayModel {
        frame,
        view_box: frame.view_box(),
        transform,
        svg_transform: transform.to_svg(),
        zoom: viewport.zoom,
        markers,
        match_count: search.matches(dataset).len(),
        active_index: search.active_index(),
        active_id,
    })
}

fn marker(point: &TestPoint, active: bool, radius: f64, config: &ViewerConfig) -> Marker {
    let (radius, color) = if active {
        (
            radius * config.active_radius_scale,
            config.highlight_color.clone(),
        )
    } else {
        (radius, type_color(&point.type_code))
    };

    Marker {
        id: point.id.clone(),
        x: point.x,
        y: point.y,
        radius,
        color,
        active,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::board::parse;
    use crate::navigation::SearchMode;

    const EPSILON: f64 = 1e-9;

    fn board() -> Dataset {
        parse(
            "$A 0 0 TP 1 (T) N1 GND\n$B 50 20 VIA 1 (B) N2 VCC\n$A 9 9 TP 1 (T) N1 GND\n",
            "board.asc",
        )
        .expect("fixture parses")
    }

    #[test]
    fn radius_follows_power_law() {
        let config = ViewerConfig::default();
        assert!((point_radius(1.0, &config) - config.base_radius).abs() < EPSILON);
        let r10 = point_radius(10.0, &config);
        assert!((r10 - config.base_radius * 10f64.powf(-0.3)).abs() < EPSILON);
        assert!(r10 < config.base_radius);
        assert!(r10 > config.base_radius / 10.0, "dampened, not pure inverse");
    }

    #[test]
    fn type_color_is_stable_per_type() {
        assert_eq!(type_color("TP"), type_color("TP"));
        assert!(type_color("VIA").starts_with("hsl("));
    }

    #[test]
    fn render_without_dataset_is_none() {
        let model = render(
            None,
            &ViewportState::default(),
            &SearchState::default(),
            &ViewerConfig::default(),
        );
        assert!(model.is_none());
    }

    #[test]
    fn unfocused_render_has_no_active_marker() {
        let dataset = board();
        let model = render(
            Some(&dataset),
            &ViewportState::default(),
            &SearchState::default(),
            &ViewerConfig::default(),
        )
        .expect("dataset loaded");
        assert_eq!(model.markers.len(), 3);
        assert!(model.markers.iter().all(|m| !m.active));
        assert_eq!(model.match_count, 0);
        assert!(model.active_id.is_none());
    }

    #[test]
    fn model_carries_svg_attributes() {
        let dataset = board();
        let config = ViewerConfig::default();
        let default_model = render(
            Some(&dataset),
            &ViewportState::default(),
            &SearchState::default(),
            &config,
        )
        .expect("dataset loaded");
        assert_eq!(default_model.view_box, "-10 -10 70 40");
        assert_eq!(default_model.svg_transform, "scale(1) translate(0, 0)");

        let mut view = ViewportState::default();
        view.zoom_in(&config);
        view.pan(-2.5, 4.0);
        let model = render(Some(&dataset), &view, &SearchState::default(), &config)
            .expect("dataset loaded");
        assert_eq!(model.svg_transform, "scale(1.5) translate(-2.5, 4)");
        assert_eq!(model.view_box, default_model.view_box);
    }

    #[test]
    fn focused_marker_is_enlarged_and_highlighted_once() {
        let dataset = board();
        let config = ViewerConfig::default();
        let mut search = SearchState::default();
        search.set_query("a", SearchMode::ById);
        let focus = search.cycle(&dataset);
        assert_eq!(focus.as_deref(), Some("A"));

        let model = render(Some(&dataset), &ViewportState::default(), &search, &config)
            .expect("dataset loaded");

        let active: Vec<&Marker> = model.markers.iter().filter(|m| m.active).collect();
        assert_eq!(active.len(), 1, "duplicate ids: first match wins");
        assert!((active[0].x).abs() < EPSILON);
        assert!((active[0].radius - config.base_radius * 2.5).abs() < EPSILON);
        assert_eq!(active[0].color, config.highlight_color);
        assert_eq!(model.match_count, 2);
        assert_eq!(model.active_index, Some(0));
    }
}
