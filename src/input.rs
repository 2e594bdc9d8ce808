//! Input Reader: extracts the ordered query column from a spreadsheet.
//!
//! Queries are taken from the first column of the first sheet, in row order.
//! Blank and missing cells are skipped, not padded, so sequence numbers
//! assigned downstream are positional in the filtered list. The first row is
//! NOT treated as a header; a header row becomes a phantom query.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported input extension (expected .xlsx, .xls or .csv): {0}")]
    UnsupportedExtension(PathBuf),

    #[error("failed to open spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook has no worksheets")]
    NoWorksheets,

    #[error("failed to parse CSV input: {0}")]
    Csv(#[from] csv::Error),
}

/// Read the query column from `path`, dispatching on the file extension.
pub fn read_queries(path: &Path) -> Result<Vec<String>, ReadError> {
    if !path.exists() {
        return Err(ReadError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let queries = match extension.as_deref() {
        Some("xlsx") | Some("xlsm") | Some("xls") => read_spreadsheet(path)?,
        Some("csv") => read_csv(path)?,
        _ => return Err(ReadError::UnsupportedExtension(path.to_path_buf())),
    };

    info!("Loaded {} queries from {}", queries.len(), path.display());
    Ok(queries)
}

fn read_spreadsheet(path: &Path) -> Result<Vec<String>, ReadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ReadError::NoWorksheets)??;

    let mut queries = Vec::new();
    for row in range.rows() {
        let Some(cell) = row.first() else { continue };
        if matches!(cell, Data::Empty) {
            continue;
        }
        let text = cell.to_string();
        let text = text.trim();
        if !text.is_empty() {
            queries.push(text.to_string());
        }
    }
    Ok(queries)
}

/// CSV fallback: first comma-separated field per line, `#` lines skipped.
fn read_csv(path: &Path) -> Result<Vec<String>, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut queries = Vec::new();
    for result in reader.records() {
        let record = result?;
        if let Some(query) = record.get(0) {
            if !query.is_empty() {
                queries.push(query.to_string());
            }
        }
    }
    Ok(queries)
}
