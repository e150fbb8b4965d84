pub mod formatter;

pub use formatter::{format_json, format_report_text, format_score, should_use_colors};
