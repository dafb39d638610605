//! Test point file ingestion: record schema, parser, and dataset types.

pub mod parser;
pub mod record;
pub mod types;

pub use parser::{is_supported_extension, parse, parse_bytes};
pub use types::*;
