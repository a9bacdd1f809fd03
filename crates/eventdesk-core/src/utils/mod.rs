//! Utility functions for string and timestamp formatting.

pub mod format;

pub use format::{format_datetime, parse_timestamp, truncate_string};
