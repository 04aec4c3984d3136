pub mod line_diff;
pub mod text_diff;
#[cfg(feature = "csv-view")]
pub mod csv_view;

pub use line_diff::{diff_lines, split_lines, DiffRecord, DiffStats};
pub use text_diff::{decode_text, TextComparison, TextDiffConfig, TextDiffEngine};
#[cfg(feature = "csv-view")]
pub use csv_view::{is_csv_file, CsvView, CsvViewer};
