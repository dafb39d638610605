//! Case-insensitive substring search by point id or net name.

use serde::{Deserialize, Serialize};

use crate::board::{Dataset, TestPoint};

/// Which field a query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchMode {
    /// Match on point id.
    #[default]
    ById,
    /// Match on net name.
    ByNet,
}

impl SearchMode {
    fn field(self, point: &TestPoint) -> &str {
        match self {
            Self::ById => &point.id,
            Self::ByNet => &point.net_name,
        }
    }
}

/// Returns every matching point in dataset order, duplicates included.
///
/// A blank query matches nothing.
pub fn search<'a>(dataset: &'a Dataset, query: &str, mode: SearchMode) -> Vec<&'a TestPoint> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    dataset
        .points()
        .iter()
        .filter(|point| mode.field(point).to_lowercase().contains(&needle))
        .collect()
}
