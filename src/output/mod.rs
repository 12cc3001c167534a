pub mod formatter;

pub use formatter::{format_band_summary, format_questions, format_table, should_use_colors};
