//! Search and match cycling over a loaded dataset.

pub mod cycle;
pub mod search;

pub use cycle::SearchState;
pub use search::{search, SearchMode};
