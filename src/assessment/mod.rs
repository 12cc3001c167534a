//! The assessment table: cell values, rows, spreadsheet input and CSV export.

pub mod export;
pub mod fields;
pub mod table;
pub mod value;
pub mod workbook;

pub use export::{export_high_csv, filter_high, write_csv};
pub use table::{Row, Table};
pub use value::CellValue;
pub use workbook::{load_template, read_assessment, AssessmentError};
