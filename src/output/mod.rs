pub mod formatter;

pub use formatter::{
    format_bar, format_json, format_recommendations, format_report, format_tsv, should_use_colors,
    OutputFormat,
};
