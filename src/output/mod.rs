//! Output formatters for trip statistics reports

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::{format_duration, TextFormatter};
