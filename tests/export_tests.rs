//! Output writer tests: schema, style variants, and destination handling.
//!
//! Written workbooks are read back with calamine to assert on the cell
//! contents the downstream consumer actually sees.

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use appcatfinder::config::{QueryLabel, ReportConfig};
use appcatfinder::export::{write_csv, write_xlsx};
use appcatfinder::record::{LookupOutcome, LookupRecord};

fn style(query_label: QueryLabel, color_whole_row: bool) -> ReportConfig {
    ReportConfig {
        query_label,
        color_whole_row,
        sheet_name: "Sheet1".to_string(),
    }
}

fn found_record(sequence_number: u32, query: &str, category: &str, subcategory: &str) -> LookupRecord {
    let outcome = LookupOutcome::classify(
        vec![category.to_string()],
        vec![subcategory.to_string()],
    );
    LookupRecord::new(sequence_number, query, &outcome)
}

/// Read every cell of the first sheet back as trimmed strings.
fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("reopen written workbook");
    let range = workbook
        .worksheet_range_at(0)
        .expect("sheet present")
        .expect("sheet readable");

    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_empty_results_write_header_only_sheet() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("output.xlsx");

    write_xlsx(&[], &path, &style(QueryLabel::Url, true)).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 1, "empty input must still produce a header row");
    assert_eq!(rows[0], vec!["SNO", "URL", "Category", "Sub Category"]);
}

#[test]
fn test_missing_output_directory_is_created() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reports").join("august").join("output.xlsx");
    assert!(!path.parent().unwrap().exists());

    write_xlsx(&[], &path, &style(QueryLabel::Url, true)).unwrap();

    assert!(path.exists());
}

#[test]
fn test_rows_preserve_input_order_and_schema() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("output.xlsx");

    let records = vec![
        found_record(1, "tiktok.com", "Social Networking", "General Social Networking"),
        LookupRecord::new(2, "nonsense", &LookupOutcome::NotFound),
        LookupRecord::new(3, "garbage-input-!!", &LookupOutcome::InvalidInput),
    ];

    write_xlsx(&records, &path, &style(QueryLabel::Url, true)).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[1],
        vec!["1", "tiktok.com", "Social Networking", "General Social Networking"]
    );
    assert_eq!(
        rows[2],
        vec!["2", "nonsense", "No Categories Found", "No Sub Categories Found"]
    );
    assert_eq!(
        rows[3],
        vec![
            "3",
            "garbage-input-!!",
            "No Application Found",
            "No Application Found"
        ]
    );
}

#[test]
fn test_application_label_variant_changes_header_only() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("output.xlsx");

    let records = vec![found_record(1, "zoom", "Collaboration", "Video Conferencing")];
    write_xlsx(&records, &path, &style(QueryLabel::Application, false)).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows[0][1], "Application");
    assert_eq!(rows[1][1], "zoom");
}

#[test]
fn test_multi_line_category_text_survives_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("output.xlsx");

    let outcome = LookupOutcome::classify(
        vec!["Collaboration".to_string(), "Media".to_string()],
        vec!["Instant Messaging".to_string()],
    );
    let records = vec![LookupRecord::new(1, "slack.com", &outcome)];

    write_xlsx(&records, &path, &style(QueryLabel::Url, true)).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows[1][2], "Collaboration\nMedia");
}

#[test]
fn test_csv_export_schema_matches_xlsx() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("output.csv");

    let records = vec![
        found_record(1, "tiktok.com", "Social Networking", "General Social Networking"),
        LookupRecord::new(2, "nonsense", &LookupOutcome::NotFound),
    ];

    write_csv(&records, &path, &style(QueryLabel::Url, true)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("SNO,URL,Category,Sub Category"));
    assert_eq!(
        lines.next(),
        Some("1,tiktok.com,Social Networking,General Social Networking")
    );
    assert_eq!(
        lines.next(),
        Some("2,nonsense,No Categories Found,No Sub Categories Found")
    );
}
