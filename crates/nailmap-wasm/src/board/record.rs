//! Positional record schema for `$`-prefixed test point rows.
//!
//! A row is tokenized on whitespace runs, then bound to named fields by
//! position. Everything past the fixed fields is the "tail", which carries
//! the optional net name and `T PIN` virtual pin suffix.

use super::types::{TestPoint, NET_NAME_PLACEHOLDER};

/// Character that marks a line as a candidate point record.
pub const ROW_MARKER: char = '$';

/// Minimum number of tokens in an accepted record.
pub const MIN_FIELDS: usize = 7;

/// Marker separating the net name from the virtual pin in the tail.
pub const VIRTUAL_PIN_MARKER: &str = "T PIN";

/// Why a candidate row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    /// Fewer than [`MIN_FIELDS`] tokens.
    TooFewFields(usize),
    /// X or Y is not a finite number.
    NonFiniteCoordinate,
}

/// Net name and virtual pin derived from the record tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailFields {
    /// Net name, or the placeholder.
    pub net_name: String,
    /// Text after `T PIN`, trimmed; empty when the marker is absent.
    pub virtual_pin: String,
}

/// Returns the row body (marker removed) if `line` is a candidate record.
pub fn candidate_body(line: &str) -> Option<&str> {
    line.trim().strip_prefix(ROW_MARKER)
}

/// Binds the tokens of a row body to a [`TestPoint`].
///
/// # Errors
///
/// Returns a [`RowRejection`] when the row is too short or a coordinate
/// is not a finite number. Callers drop such rows.
pub fn parse_record(body: &str) -> Result<TestPoint, RowRejection> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    let [id, x, y, type_code, grid, side, net_id, tail @ ..] = tokens.as_slice() else {
        return Err(RowRejection::TooFewFields(tokens.len()));
    };

    let x = parse_coordinate(x)?;
    let y = parse_coordinate(y)?;
    let tail_fields = parse_tail(tail);

    Ok(TestPoint {
        id: (*id).to_string(),
        x,
        y,
        type_code: (*type_code).to_string(),
        grid: (*grid).to_string(),
        side: strip_parentheses(side),
        net_id: (*net_id).to_string(),
        net_name: tail_fields.net_name,
        virtual_pin: tail_fields.virtual_pin,
    })
}

/// Derives the net name and virtual pin from the tokens after `net_id`.
///
/// With a `T PIN` marker the net name is the text before it and the
/// virtual pin the text after it. Without one, the first tail token is the
/// net name.
pub fn parse_tail(tail: &[&str]) -> TailFields {
    let joined = tail.join(" ");

    if let Some((before, after)) = joined.split_once(VIRTUAL_PIN_MARKER) {
        let name = before.trim();
        return TailFields {
            net_name: if name.is_empty() {
                NET_NAME_PLACEHOLDER.to_string()
            } else {
                name.to_string()
            },
            virtual_pin: after.trim().to_string(),
        };
    }

    TailFields {
        net_name: tail
            .first()
            .map_or_else(|| NET_NAME_PLACEHOLDER.to_string(), |t| (*t).to_string()),
        virtual_pin: String::new(),
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, RowRejection> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(RowRejection::NonFiniteCoordinate)
}

fn strip_parentheses(raw: &str) -> String {
    raw.chars().filter(|ch| !matches!(ch, '(' | ')')).collect()
}
