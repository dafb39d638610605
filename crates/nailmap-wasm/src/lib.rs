#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `NailMap` WASM module — test point file parsing, search, and viewport navigation.

pub mod board;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod viewport;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::board::TestPoint;
use crate::config::ViewerConfig;
use crate::navigation::SearchMode;
use crate::session::{BoardSummary, ViewerSession};
use crate::viewport::DisplayModel;

thread_local! {
    static SESSION: RefCell<ViewerSession> = RefCell::new(ViewerSession::default());
}

fn with_session<R>(f: impl FnOnce(&mut ViewerSession) -> R) -> R {
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

const fn mode_from_flag(by_net: bool) -> SearchMode {
    if by_net {
        SearchMode::ByNet
    } else {
        SearchMode::ById
    }
}

/// Initialize the WASM module. Sets up the panic hook for debugging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Parse a test point file from raw bytes and make it the active board.
///
/// Returns a `BoardSummary` as a `JsValue` via `serde-wasm-bindgen`.
/// Search text and focus are cleared whether or not the parse succeeds.
///
/// # Errors
///
/// Returns a descriptive error string if the file has no valid rows. The
/// previously loaded board stays active.
#[wasm_bindgen]
pub fn load_board(data: &[u8], file_name: &str) -> Result<JsValue, JsValue> {
    let summary = load_board_internal(data, file_name).map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal load logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn load_board_internal(data: &[u8], file_name: &str) -> Result<BoardSummary, String> {
    with_session(|s| s.load(data, file_name)).map_err(|e| e.to_string())
}

/// Whether the file picker should offer this file name.
#[wasm_bindgen]
pub fn is_supported_file(file_name: &str) -> bool {
    board::is_supported_extension(file_name)
}

/// Replace the viewer constants with a partial or full config object.
///
/// Missing fields take their defaults.
///
/// # Errors
///
/// Returns an error string if the object cannot be read or fails validation.
#[wasm_bindgen]
pub fn configure(value: JsValue) -> Result<(), JsValue> {
    let config: ViewerConfig =
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_session(|s| s.configure(config)).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Set the query text and mode. Any change resets match cycling.
#[wasm_bindgen]
pub fn set_query(query: &str, by_net: bool) {
    with_session(|s| s.set_query(query, mode_from_flag(by_net)));
}

/// Points matching `query` in dataset order, without changing the session.
///
/// Returns an array of test points as a `JsValue`; empty before the first load.
///
/// # Errors
///
/// Returns an error string if serialization fails.
#[wasm_bindgen]
pub fn search(query: &str, by_net: bool) -> Result<JsValue, JsValue> {
    let points = search_internal(query, by_net);
    serde_wasm_bindgen::to_value(&points).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal search logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn search_internal(query: &str, by_net: bool) -> Vec<TestPoint> {
    with_session(|s| s.matching_points(query, mode_from_flag(by_net)))
}

/// Advance to the next match and center on it. Returns the focused id.
#[wasm_bindgen]
pub fn cycle_match() -> Option<String> {
    with_session(ViewerSession::cycle)
}

/// Focus a point picked directly. Returns false for unknown ids.
#[wasm_bindgen]
pub fn select_point(id: &str) -> bool {
    with_session(|s| s.select(id))
}

/// Zoom-in control.
#[wasm_bindgen]
pub fn zoom_in() {
    with_session(ViewerSession::zoom_in);
}

/// Zoom-out control.
#[wasm_bindgen]
pub fn zoom_out() {
    with_session(ViewerSession::zoom_out);
}

/// Multiply the zoom by `factor`, clamped to the configured range.
#[wasm_bindgen]
pub fn zoom_by(factor: f64) {
    with_session(|s| s.zoom_by(factor));
}

/// One mouse wheel tick.
#[wasm_bindgen]
pub fn wheel(delta_y: f64) {
    with_session(|s| s.wheel(delta_y));
}

/// Pan by a delta in data units.
#[wasm_bindgen]
pub fn pan(dx: f64, dy: f64) {
    with_session(|s| s.pan(dx, dy));
}

/// Pointer down on the board.
#[wasm_bindgen]
pub fn begin_drag(x: f64, y: f64) {
    with_session(|s| s.begin_drag(x, y));
}

/// Pointer move; pans only while a drag is active.
#[wasm_bindgen]
pub fn drag_to(x: f64, y: f64) {
    with_session(|s| s.drag_to(x, y));
}

/// Pointer up or leave.
#[wasm_bindgen]
pub fn end_drag() {
    with_session(ViewerSession::end_drag);
}

/// Restore zoom 1 and zero offset.
#[wasm_bindgen]
pub fn reset_view() {
    with_session(ViewerSession::reset_view);
}

/// Current zoom level.
#[wasm_bindgen]
pub fn get_zoom() -> f64 {
    with_session(|s| s.viewport().zoom)
}

/// Current pan offset as `[x, y]`.
#[wasm_bindgen]
pub fn get_offset() -> Vec<f64> {
    with_session(|s| vec![s.viewport().offset_x, s.viewport().offset_y])
}

/// Display model for the current state, or `null` before the first load.
///
/// # Errors
///
/// Returns an error string if serialization fails.
#[wasm_bindgen]
pub fn render() -> Result<JsValue, JsValue> {
    match render_internal() {
        Some(model) => {
            serde_wasm_bindgen::to_value(&model).map_err(|e| JsValue::from_str(&e.to_string()))
        }
        None => Ok(JsValue::NULL),
    }
}

/// Internal render logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn render_internal() -> Option<DisplayModel> {
    with_session(|s| s.render())
}

/// Drops the active board and all view state. Used by native tests.
#[doc(hidden)]
pub fn reset_session_internal() {
    with_session(|s| *s = ViewerSession::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &[u8] = b"Imperial units\n$N1 0 0 TP 1 (T) 1 GND\n$N2 40 30 TP 1 (B) 2 VCC T PIN 3\n";

    #[test]
    fn load_then_render() {
        reset_session_internal();
        let result = load_board_internal(BOARD, "board.asc");
        assert!(
            result.is_ok(),
            "expected Ok, got Err: {:?}",
            result.as_ref().err()
        );
        let Some(model) = render_internal() else {
            return;
        };
        assert_eq!(model.markers.len(), 2);
        assert!((model.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn render_before_load_is_none() {
        reset_session_internal();
        assert!(render_internal().is_none());
    }

    #[test]
    fn load_garbage_returns_error() {
        reset_session_internal();
        let garbage: &[u8] = &[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01, 0x02, 0x03];
        let result = load_board_internal(garbage, "garbage.asc");
        assert!(result.is_err(), "garbage must not produce a board");
    }

    #[test]
    fn exported_navigation_round() {
        reset_session_internal();
        assert!(load_board_internal(BOARD, "board.asc").is_ok());
        set_query("vcc", true);
        let found = search_internal("vcc", true);
        assert_eq!(found.len(), 1);
        if let Some(point) = found.first() {
            assert_eq!(point.id, "N2");
            assert_eq!(point.net_name, "VCC");
            assert_eq!(point.virtual_pin, "3");
            assert!((point.x - 40.0).abs() < f64::EPSILON);
        }
        assert_eq!(search_internal("n", false).len(), 2);
        assert_eq!(cycle_match().as_deref(), Some("N2"));
        assert!((get_zoom() - 10.0).abs() < f64::EPSILON);

        reset_view();
        assert!((get_zoom() - 1.0).abs() < f64::EPSILON);
        assert_eq!(get_offset(), vec![0.0, 0.0]);

        zoom_in();
        begin_drag(0.0, 0.0);
        drag_to(3.0, 0.0);
        end_drag();
        let offset = get_offset();
        assert!((offset.first().copied().unwrap_or_default() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn search_before_load_is_empty() {
        reset_session_internal();
        assert!(search_internal("n1", false).is_empty());
    }

    #[test]
    fn supported_file_names() {
        assert!(is_supported_file("board.asc"));
        assert!(!is_supported_file("board.gbr"));
    }
}
