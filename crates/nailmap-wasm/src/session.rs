//! The viewer session: one explicit state struct with a transition per UI event.

use serde::Serialize;

use crate::board::{self, BoardMetadata, BoundingBox, Dataset, TestPoint};
use crate::config::ViewerConfig;
use crate::error::{ConfigError, ParseError};
use crate::navigation::{search, SearchMode, SearchState};
use crate::viewport::{render, DisplayModel, LogicalFrame, ViewportState};

/// Returned to the page after a successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    /// File-level metadata.
    pub metadata: BoardMetadata,
    /// Bounds over all points.
    pub bounds: BoundingBox,
    /// Logical frame the view is drawn in.
    pub frame: LogicalFrame,
}

/// Active dataset plus all transient view state.
///
/// The dataset is only ever replaced wholesale. Viewport and search state
/// reset on every successful load.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerSession {
    dataset: Option<Dataset>,
    viewport: ViewportState,
    search: SearchState,
    config: ViewerConfig,
}

impl ViewerSession {
    /// Creates an empty session with the given config.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn with_config(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Loads raw file bytes, replacing the dataset on success.
    ///
    /// The search query and focus are cleared either way. A failed load
    /// keeps the previous dataset and viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoDataFound`] if the file has no valid rows.
    pub fn load(&mut self, data: &[u8], file_name: &str) -> Result<BoardSummary, ParseError> {
        self.search.clear();
        let dataset = board::parse_bytes(data, file_name)?;
        Ok(self.install(dataset))
    }

    /// Loads already-decoded text. Same semantics as [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoDataFound`] if the text has no valid rows.
    pub fn load_text(&mut self, content: &str, file_name: &str) -> Result<BoardSummary, ParseError> {
        self.search.clear();
        let dataset = board::parse(content, file_name)?;
        Ok(self.install(dataset))
    }

    fn install(&mut self, dataset: Dataset) -> BoardSummary {
        let summary = BoardSummary {
            metadata: dataset.metadata().clone(),
            bounds: dataset.bounds(),
            frame: LogicalFrame::from_bounds(&dataset.bounds(), self.config.padding),
        };
        self.dataset = Some(dataset);
        self.viewport.reset();
        summary
    }

    /// Active dataset, if one has loaded.
    pub const fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Current viewport state.
    pub const fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Current search state.
    pub const fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Current config.
    pub const fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Replaces the config and re-clamps the zoom into the new range.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] and keeps the old config if validation fails.
    pub fn configure(&mut self, config: ViewerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.viewport.zoom = config.clamp_zoom(self.viewport.zoom);
        self.config = config;
        Ok(())
    }

    /// Query text or mode changed.
    pub fn set_query(&mut self, query: &str, mode: SearchMode) {
        self.search.set_query(query, mode);
    }

    /// Mode toggled, text unchanged.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.search.set_mode(mode);
    }

    /// Points matching `query` in dataset order, without touching the cycle state.
    pub fn matching_points(&self, query: &str, mode: SearchMode) -> Vec<TestPoint> {
        self.dataset.as_ref().map_or_else(Vec::new, |dataset| {
            search(dataset, query, mode).into_iter().cloned().collect()
        })
    }

    /// Advances to the next match and centers the view on it.
    pub fn cycle(&mut self) -> Option<String> {
        let dataset = self.dataset.as_ref()?;
        let id = self.search.cycle(dataset)?;
        self.viewport.focus_on(dataset, &id, &self.config);
        Some(id)
    }

    /// Focuses a directly selected point. Unknown ids change nothing.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(dataset) = self.dataset.as_ref() else {
            return false;
        };
        if !self.viewport.focus_on(dataset, id, &self.config) {
            return false;
        }
        self.search.select(id);
        true
    }

    /// Multiplies the zoom by `factor`, clamped.
    pub fn zoom_by(&mut self, factor: f64) {
        self.viewport.zoom_by(factor, &self.config);
    }

    /// Zoom-in button.
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(&self.config);
    }

    /// Zoom-out button.
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(&self.config);
    }

    /// Wheel tick.
    pub fn wheel(&mut self, delta_y: f64) {
        self.viewport.wheel(delta_y, &self.config);
    }

    /// Pans by a data-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
    }

    /// Pointer down.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.viewport.begin_drag(x, y);
    }

    /// Pointer move.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        self.viewport.drag_to(x, y);
    }

    /// Pointer up or leave.
    pub fn end_drag(&mut self) {
        self.viewport.end_drag();
    }

    /// Reset button: zoom 1, zero offset.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Display model for the current state, or `None` before the first load.
    pub fn render(&self) -> Option<DisplayModel> {
        render(
            self.dataset.as_ref(),
            &self.viewport,
            &self.search,
            &self.config,
        )
    }
}
