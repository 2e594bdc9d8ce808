//! Output Writer: renders lookup records to a styled workbook or plain CSV.
//!
//! The xlsx layout mirrors the report the tool replaces: fixed column
//! widths, wrapped top-aligned cells (category columns routinely hold
//! multi-line text), a filled header row, and outcome-keyed font colors.

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::config::ReportConfig;
use crate::record::{LookupRecord, OutcomeKind};

/// Column widths in character units: SNO, query, category, sub-category.
const COLUMN_WIDTHS: [f64; 4] = [5.0, 20.0, 35.0, 35.0];

const HEADER_FILL: Color = Color::RGB(0xFFE699);
const FOUND_FONT: Color = Color::RGB(0x008000);
const NOT_FOUND_FONT: Color = Color::RGB(0xFF0000);
const INVALID_INPUT_FONT: Color = Color::RGB(0x0000FF);

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write output file: {0}")]
    Io(#[from] io::Error),
}

/// Font color keyed on the row's outcome.
fn outcome_font(outcome: OutcomeKind) -> Color {
    match outcome {
        OutcomeKind::Found => FOUND_FONT,
        OutcomeKind::NotFound => NOT_FOUND_FONT,
        OutcomeKind::InvalidInput => INVALID_INPUT_FONT,
    }
}

fn data_format(font_color: Option<Color>) -> Format {
    let format = Format::new().set_align(FormatAlign::Top).set_text_wrap();
    match font_color {
        Some(color) => format.set_font_color(color),
        None => format,
    }
}

/// Write one header row plus one row per record to an xlsx workbook.
///
/// `style.color_whole_row` selects between the two report generations:
/// outcome color across all four columns (canonical), or only on the two
/// category columns.
pub fn write_xlsx(
    records: &[LookupRecord],
    output_path: &Path,
    style: &ReportConfig,
) -> Result<(), WriteError> {
    ensure_parent_dir(output_path)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&style.sheet_name)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let header_format = Format::new()
        .set_bold()
        .set_background_color(HEADER_FILL)
        .set_align(FormatAlign::Top)
        .set_text_wrap();
    let headers = header_row(style);
    for (col, title) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    let plain = data_format(None);
    for (index, record) in records.iter().enumerate() {
        let row = (index + 1) as u32;
        let colored = data_format(Some(outcome_font(record.outcome)));
        let leading = if style.color_whole_row { &colored } else { &plain };

        worksheet.write_number_with_format(row, 0, record.sequence_number as f64, leading)?;
        worksheet.write_string_with_format(row, 1, &record.query, leading)?;
        worksheet.write_string_with_format(row, 2, &record.category, &colored)?;
        worksheet.write_string_with_format(row, 3, &record.subcategory, &colored)?;
    }

    workbook.save(output_path)?;
    info!(
        "Wrote {} result rows to {}",
        records.len(),
        output_path.display()
    );
    Ok(())
}

/// Plain CSV with the same column schema. No styling; the sentinel text
/// carries the outcome.
pub fn write_csv(
    records: &[LookupRecord],
    output_path: &Path,
    style: &ReportConfig,
) -> Result<(), WriteError> {
    ensure_parent_dir(output_path)?;

    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(header_row(style))?;
    for record in records {
        writer.write_record([
            record.sequence_number.to_string().as_str(),
            record.query.as_str(),
            record.category.as_str(),
            record.subcategory.as_str(),
        ])?;
    }
    writer.flush()?;

    info!(
        "Wrote {} result rows to {}",
        records.len(),
        output_path.display()
    );
    Ok(())
}

fn header_row(style: &ReportConfig) -> [&'static str; 4] {
    ["SNO", style.query_label.as_str(), "Category", "Sub Category"]
}

fn ensure_parent_dir(path: &Path) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
