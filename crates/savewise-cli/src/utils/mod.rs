//! Utility functions for terminal output formatting.

pub mod format;

pub use format::{format_amount, format_date, format_phone, truncate_string};
