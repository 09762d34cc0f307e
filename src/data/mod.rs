pub mod assemble;
pub mod dataset;
pub mod record;
pub mod split;
pub mod spreadsheet;

use thiserror::Error;

pub use assemble::{assemble, records_from_rows, AssembleReport};
pub use dataset::{load_dataset, load_dataset_or_empty, save_dataset};
pub use record::Record;
pub use split::{sample_indices, split_file, split_validation, validation_size, Split, SplitReport};
pub use spreadsheet::read_rows;

/// Number of leading columns mapped onto a record
pub const RECORD_COLUMNS: usize = 3;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("row {row} has {found} columns, at least 3 are required")]
    TooFewColumns { row: usize, found: usize },

    #[error("spreadsheet {0} contains no rows")]
    EmptySheet(String),

    #[error("workbook {0} has no worksheets")]
    NoWorksheet(String),

    #[error("unsupported spreadsheet format '{0}' (expected xlsx, xlsm, xlsb, xls, ods or csv)")]
    UnsupportedFormat(String),

    #[error("split denominator must be > 0")]
    ZeroDenominator,
}
