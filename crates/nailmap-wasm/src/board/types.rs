//! Test-point dataset types and the `DatasetBuilder` accumulator.

use serde::{Deserialize, Serialize};

/// Net name used when a row carries no net information.
pub const NET_NAME_PLACEHOLDER: &str = "N/A";

/// One test location ("nail") on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPoint {
    /// Point identifier, assumed unique within a dataset.
    pub id: String,
    /// X board coordinate.
    pub x: f64,
    /// Y board coordinate.
    pub y: f64,
    /// Classification code, used only for color grouping.
    #[serde(rename = "type")]
    pub type_code: String,
    /// Grid reference, passed through.
    pub grid: String,
    /// Board side with parentheses removed.
    pub side: String,
    /// Net identifier, passed through.
    pub net_id: String,
    /// Net name, or [`NET_NAME_PLACEHOLDER`].
    pub net_name: String,
    /// Virtual pin reference, possibly empty.
    pub virtual_pin: String,
}

/// Unit system declared in the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    /// Metric (millimeters).
    Metric,
    /// Imperial (mils / inches).
    Imperial,
    /// No unit header found.
    #[default]
    Unknown,
}

/// File-level metadata collected during the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMetadata {
    /// Display name of the source file.
    pub file_name: String,
    /// Number of accepted test points.
    pub total_nails: usize,
    /// Declared unit system.
    pub units: Units,
    /// Recorded `D-Month-YYYY HH:MM` timestamp, verbatim.
    pub date: Option<String>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates an empty bounding box that will expand with the first `update` call.
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Expands the bounding box to include the given point.
    pub fn update(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Returns true until the first `update`.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns true if `(x, y)` lies inside or on the box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable result of one successful parse.
///
/// Only [`DatasetBuilder::build`] creates one, and only with at least one
/// point, so `bounds` is always a valid box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    points: Vec<TestPoint>,
    metadata: BoardMetadata,
    bounds: BoundingBox,
}

impl Dataset {
    /// Points in source file order.
    pub fn points(&self) -> &[TestPoint] {
        &self.points
    }

    /// File-level metadata.
    pub const fn metadata(&self) -> &BoardMetadata {
        &self.metadata
    }

    /// Min/max over all point coordinates.
    pub const fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// First point with the given id, in dataset order.
    pub fn find(&self, id: &str) -> Option<&TestPoint> {
        self.points.iter().find(|p| p.id == id)
    }
}

/// Accumulator for building a [`Dataset`] row by row.
///
/// Bounds grow with every accepted point so no second pass is needed.
#[derive(Debug)]
pub struct DatasetBuilder {
    points: Vec<TestPoint>,
    bounds: BoundingBox,
    units: Units,
    date: Option<String>,
    skipped_rows: usize,
}

impl DatasetBuilder {
    /// Creates an empty builder.
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            bounds: BoundingBox::new(),
            units: Units::Unknown,
            date: None,
            skipped_rows: 0,
        }
    }

    /// Appends an accepted point and grows the bounds.
    pub fn push_point(&mut self, point: TestPoint) {
        self.bounds.update(point.x, point.y);
        self.points.push(point);
    }

    /// Counts a candidate row that was dropped.
    pub fn skip_row(&mut self) {
        self.skipped_rows += 1;
    }

    /// Records a unit header; the last one wins.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    /// Records a dated header line; the last one wins.
    pub fn set_date(&mut self, date: String) {
        self.date = Some(date);
    }

    /// Number of accepted points so far.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of dropped candidate rows so far.
    pub const fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Consumes the builder. Returns `None` when no point was accepted.
    pub fn build(self, file_name: &str) -> Option<Dataset> {
        if self.points.is_empty() {
            return None;
        }

        let metadata = BoardMetadata {
            file_name: file_name.to_string(),
            total_nails: self.points.len(),
            units: self.units,
            date: self.date,
        };

        Some(Dataset {
            points: self.points,
            metadata,
            bounds: self.bounds,
        })
    }
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
