//! Query state and ordered match cycling.

use serde::{Deserialize, Serialize};

use crate::board::{Dataset, TestPoint};

use super::search::{search, SearchMode};

/// Current query, mode, selected match, and focus target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    query: String,
    mode: SearchMode,
    active_index: Option<usize>,
    focus: Option<String>,
}

impl SearchState {
    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current search mode.
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Selected match index; `None` until the first cycle step.
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Id of the focused point, if any.
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Updates query and mode. Any change drops the selection and focus.
    pub fn set_query(&mut self, query: &str, mode: SearchMode) {
        if self.query == query && self.mode == mode {
            return;
        }
        self.query = query.to_string();
        self.mode = mode;
        self.active_index = None;
        self.focus = None;
    }

    /// Switches mode, keeping the query text.
    pub fn set_mode(&mut self, mode: SearchMode) {
        if self.mode != mode {
            self.mode = mode;
            self.active_index = None;
            self.focus = None;
        }
    }

    /// Points matching the current query.
    pub fn matches<'a>(&self, dataset: &'a Dataset) -> Vec<&'a TestPoint> {
        search(dataset, &self.query, self.mode)
    }

    /// Advances to the next match and returns its id as the new focus target.
    ///
    /// With zero matches nothing changes and `None` is returned.
    pub fn cycle(&mut self, dataset: &Dataset) -> Option<String> {
        let matches = self.matches(dataset);
        let count = matches.len();
        if count == 0 {
            return None;
        }

        let next = self.active_index.map_or(0, |i| (i + 1) % count);
        let id = matches.get(next).map(|p| p.id.clone())?;
        self.active_index = Some(next);
        self.focus = Some(id.clone());
        Some(id)
    }

    /// Focuses a directly selected point, leaving the query in place.
    pub fn select(&mut self, id: &str) {
        self.active_index = None;
        self.focus = Some(id.to_string());
    }

    /// Clears query, selection, and focus.
    pub fn clear(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::default()
        };
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::board::parse;

    fn board() -> Dataset {
        parse(
            "$R1 0 0 TP 1 (T) N1 GND\n\
             $R2 1 1 TP 1 (T) N2 VCC\n\
             $R3 2 2 TP 1 (T) N1 GND\n\
             $C1 3 3 TP 1 (T) N3 AGND\n",
            "board.asc",
        )
        .expect("fixture parses")
    }

    #[test]
    fn cycle_wraps_in_dataset_order() {
        let dataset = board();
        let mut state = SearchState::default();
        state.set_query("gnd", SearchMode::ByNet);
        assert_eq!(state.active_index(), None);

        let seen: Vec<Option<String>> = (0..4).map(|_| state.cycle(&dataset)).collect();
        assert_eq!(
            seen,
            vec![
                Some("R1".to_string()),
                Some("R3".to_string()),
                Some("C1".to_string()),
                Some("R1".to_string()),
            ]
        );
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn cycle_without_matches_is_noop() {
        let dataset = board();
        let mut state = SearchState::default();
        state.set_query("missing", SearchMode::ById);
        assert_eq!(state.cycle(&dataset), None);
        assert_eq!(state.active_index(), None);
        assert_eq!(state.focus(), None);
    }

    #[test]
    fn changing_query_resets_index() {
        let dataset = board();
        let mut state = SearchState::default();
        state.set_query("r", SearchMode::ById);
        state.cycle(&dataset);
        state.cycle(&dataset);
        assert_eq!(state.active_index(), Some(1));

        state.set_query("r1", SearchMode::ById);
        assert_eq!(state.active_index(), None);
        assert_eq!(state.focus(), None);
    }

    #[test]
    fn same_query_keeps_index() {
        let dataset = board();
        let mut state = SearchState::default();
        state.set_query("r", SearchMode::ById);
        state.cycle(&dataset);
        state.set_query("r", SearchMode::ById);
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn changing_mode_resets_index_and_keeps_text() {
        let dataset = board();
        let mut state = SearchState::default();
        state.set_query("r", SearchMode::ById);
        state.cycle(&dataset);
        state.set_mode(SearchMode::ByNet);
        assert_eq!(state.active_index(), None);
        assert_eq!(state.query(), "r");
        assert_eq!(state.mode(), SearchMode::ByNet);
    }

    #[test]
    fn select_sets_focus_and_drops_index() {
        let dataset = board();
        let mut state = SearchState::default();
        state.set_query("r", SearchMode::ById);
        state.cycle(&dataset);
        state.select("C1");
        assert_eq!(state.focus(), Some("C1"));
        assert_eq!(state.active_index(), None);
        assert_eq!(state.query(), "r");
    }

    #[test]
    fn clear_keeps_mode() {
        let mut state = SearchState::default();
        state.set_query("x", SearchMode::ByNet);
        state.select("R1");
        state.clear();
        assert_eq!(state.query(), "");
        assert_eq!(state.mode(), SearchMode::ByNet);
        assert_eq!(state.focus(), None);
    }
}
