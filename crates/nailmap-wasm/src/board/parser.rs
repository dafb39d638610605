//! Tebo-ICT compatible test point parser.
//!
//! Every line is scanned independently. Header lines contribute metadata,
//! `$`-prefixed lines are candidate point records, and everything else is
//! ignored without diagnostics.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::error::ParseError;

use super::record::{candidate_body, parse_record};
use super::types::{Dataset, DatasetBuilder, Units};

/// File extensions the file picker offers. Content alone decides acceptance.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["txt", "fab", "csv", "asc"];

const METRIC_HEADER: &str = "Metric units";
const IMPERIAL_HEADER: &str = "Imperial units";

fn date_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\d{1,2}-[A-Za-z]+-\d{4}\s+\d{2}:\d{2}").ok())
        .as_ref()
}

/// Parse decoded file text into a [`Dataset`].
///
/// # Errors
///
/// Returns [`ParseError::NoDataFound`] if no row satisfies the record
/// contract. Malformed rows are dropped and never fail the parse.
pub fn parse(content: &str, file_name: &str) -> Result<Dataset, ParseError> {
    let mut builder = DatasetBuilder::new();

    for (line_no, line) in content.lines().enumerate() {
        scan_metadata(line, &mut builder);

        let Some(body) = candidate_body(line) else {
            continue;
        };

        match parse_record(body) {
            Ok(point) => builder.push_point(point),
            Err(reason) => {
                trace!(line = line_no + 1, ?reason, "dropped candidate row");
                builder.skip_row();
            }
        }
    }

    let accepted = builder.point_count();
    let skipped = builder.skipped_rows();

    let Some(dataset) = builder.build(file_name) else {
        warn!(file_name, skipped, "no valid test points found");
        return Err(ParseError::NoDataFound {
            file_name: file_name.to_string(),
        });
    };

    let meta = dataset.metadata();
    debug!(
        file_name,
        accepted,
        skipped,
        units = ?meta.units,
        date = meta.date.as_deref().unwrap_or("-"),
        "parsed test point file"
    );

    Ok(dataset)
}

/// Parse raw file bytes, decoding them as UTF-8 with replacement.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_bytes(data: &[u8], file_name: &str) -> Result<Dataset, ParseError> {
    if !is_supported_extension(file_name) {
        debug!(file_name, "unrecognized extension; parsing by content");
    }
    let content = String::from_utf8_lossy(data);
    parse(&content, file_name)
}

/// Returns true if `file_name` ends in one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn scan_metadata(line: &str, builder: &mut DatasetBuilder) {
    if line.contains(METRIC_HEADER) {
        builder.set_units(Units::Metric);
    } else if line.contains(IMPERIAL_HEADER) {
        builder.set_units(Units::Imperial);
    }

    if let Some(found) = date_pattern().and_then(|re| re.find(line)) {
        builder.set_date(found.as_str().to_string());
    }
}
