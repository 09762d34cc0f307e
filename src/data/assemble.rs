//! Spreadsheet rows appended to an existing JSON dataset

use std::path::{Path, PathBuf};

use super::spreadsheet::check_columns;
use super::{load_dataset_or_empty, read_rows, save_dataset, DatasetError, Record};

/// Outcome of an [`assemble`] run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleReport {
    /// Records carried over from the base dataset
    pub existing: usize,
    /// Records created from spreadsheet rows
    pub added: usize,
    pub total: usize,
    pub output: PathBuf,
}

/// Map rows positionally onto records after dropping the first `skip_rows`.
///
/// Column 0 is the instruction, 1 the input, 2 the output; further columns are ignored.
pub fn records_from_rows(
    rows: &[Vec<String>],
    skip_rows: usize,
) -> Result<Vec<Record>, DatasetError> {
    check_columns(rows, skip_rows)?;
    Ok(rows
        .iter()
        .skip(skip_rows)
        .map(|row| Record::new(row[0].clone(), row[1].clone(), row[2].clone()))
        .collect())
}

/// Append the spreadsheet's records to the base dataset and write the result to `output`.
///
/// A missing base dataset counts as empty. The base file is only rewritten if
/// `output` points at it.
pub fn assemble(
    spreadsheet: impl AsRef<Path>,
    base: impl AsRef<Path>,
    output: impl AsRef<Path>,
    skip_rows: usize,
) -> anyhow::Result<AssembleReport> {
    let (spreadsheet, base, output) = (spreadsheet.as_ref(), base.as_ref(), output.as_ref());

    let rows = read_rows(spreadsheet)?;
    let new_records = records_from_rows(&rows, skip_rows)?;
    tracing::info!(
        spreadsheet = %spreadsheet.display(),
        rows = rows.len(),
        records = new_records.len(),
        "converted spreadsheet rows"
    );

    let mut records = load_dataset_or_empty(base)?;
    let existing = records.len();
    let added = new_records.len();
    records.extend(new_records);

    save_dataset(&records, output)?;
    tracing::info!(output = %output.display(), total = records.len(), "wrote merged dataset");

    Ok(AssembleReport {
        existing,
        added,
        total: records.len(),
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_header_row_is_skipped() {
        let rows = vec![
            row(&["instruction", "input", "output"]),
            row(&["q1", "", "a1"]),
            row(&["q2", "c2", "a2", "extra"]),
        ];
        let records = records_from_rows(&rows, 1).unwrap();
        assert_eq!(
            records,
            vec![Record::new("q1", "", "a1"), Record::new("q2", "c2", "a2")]
        );
    }

    #[test]
    fn test_skip_beyond_rows_yields_nothing() {
        let rows = vec![row(&["h1", "h2", "h3"])];
        assert!(records_from_rows(&rows, 1).unwrap().is_empty());
        assert!(records_from_rows(&rows, 5).unwrap().is_empty());
    }

    #[test]
    fn test_narrow_header_is_allowed() {
        let rows = vec![row(&["HIT SFT"]), row(&["q1", "", "a1"])];
        assert_eq!(
            records_from_rows(&rows, 1).unwrap(),
            vec![Record::new("q1", "", "a1")]
        );
    }

    #[test]
    fn test_narrow_rows_are_rejected() {
        let rows = vec![row(&["h1", "h2", "h3"]), row(&["q", "a"])];
        assert!(matches!(
            records_from_rows(&rows, 1),
            Err(DatasetError::TooFewColumns { row: 2, found: 2 })
        ));
    }
}
