//! Tabular source reading (Excel/ODS workbooks and CSV)

use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use super::{DatasetError, RECORD_COLUMNS};

/// Read every physical row of the first worksheet as text cells.
///
/// Rows are addressed from A1, so blank leading rows and columns come back as
/// empty cells. A sheet without rows is rejected; row width is checked by the
/// caller once it knows which rows get mapped.
pub fn read_rows(path: impl AsRef<Path>) -> anyhow::Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods" => read_workbook(path)?,
        _ => return Err(DatasetError::UnsupportedFormat(ext).into()),
    };

    if rows.is_empty() {
        return Err(DatasetError::EmptySheet(path.display().to_string()).into());
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read spreadsheet");
    Ok(rows)
}

/// Reject any row after the first `skip_rows` that is narrower than a record.
pub(crate) fn check_columns(rows: &[Vec<String>], skip_rows: usize) -> Result<(), DatasetError> {
    match rows
        .iter()
        .enumerate()
        .skip(skip_rows)
        .find(|(_, row)| row.len() < RECORD_COLUMNS)
    {
        Some((idx, row)) => Err(DatasetError::TooFewColumns {
            row: idx + 1,
            found: row.len(),
        }),
        None => Ok(()),
    }
}

fn read_workbook(path: &Path) -> anyhow::Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatasetError::NoWorksheet(path.display().to_string()))?
        .with_context(|| format!("Failed to read first worksheet of {}", path.display()))?;

    // The range begins at the first used cell, not at A1
    let (first_row, first_col) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Ok(Vec::new()),
    };
    let width = first_col + range.width();

    let mut rows = vec![vec![String::new(); width]; first_row];
    rows.extend(range.rows().map(|cells| {
        let mut row = vec![String::new(); first_col];
        row.extend(cells.iter().map(cell_text));
        row
    }));
    Ok(rows)
}

fn read_csv(path: &Path) -> anyhow::Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Malformed CSV in {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Text form of a cell; integral floats print without a fractional part.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
