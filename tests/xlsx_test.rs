//! Excelブック読み込みの統合テスト
//!
//! rust_xlsxwriter で作成した .xlsx を calamine 経由で読み戻す。

use config_lens::error::ConfigLensError;
use config_lens::extract::{CancellationFlag, Extractor, SheetStatus};
use config_lens::worksheet::{xlsx, WorksheetAccessor};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

enum Value<'a> {
    Text(&'a str),
    Number(f64),
}

type SheetSpec<'a> = (&'a str, Vec<(u32, u16, Value<'a>)>);

fn write_book(dir: &TempDir, sheets: Vec<SheetSpec>) -> PathBuf {
    let path = dir.path().join("book.xlsx");
    let mut workbook = Workbook::new();

    for (name, cells) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).unwrap();
        for (row, col, value) in cells {
            match value {
                Value::Text(text) => worksheet.write_string(row, col, text).unwrap(),
                Value::Number(n) => worksheet.write_number(row, col, n).unwrap(),
            };
        }
    }

    workbook.save(&path).unwrap();
    path
}

/// 見出し (2,2)、識別子列 3 と 5、部品3行
fn config_cells<'a>(first: &'a str, second: &'a str) -> Vec<(u32, u16, Value<'a>)> {
    use Value::*;
    vec![
        (0, 0, Text("Model X")),
        (2, 2, Text("System P/N")),
        (2, 3, Text(first)),
        (2, 5, Text(second)),
        (3, 0, Text("CPU Intel i7")),
        (3, 3, Text("i7-1185G7")),
        (3, 4, Text("CPU-01")),
        (3, 5, Text("i5-1145G7")),
        (3, 6, Text("CPU-02")),
        (4, 0, Text("Memory 16GB DDR4")),
        (4, 3, Number(16.0)),
        (4, 4, Text("MEM-01")),
        (4, 5, Number(8.0)),
        (4, 6, Text("MEM-02")),
        (5, 0, Text("LCD 15.6 FHD")),
        (5, 3, Number(15.6)),
        (5, 4, Text("LCD-01")),
        (5, 5, Text("14 HD")),
        (5, 6, Text("LCD-02")),
    ]
}

fn load_all(path: &Path) -> Vec<config_lens::worksheet::Worksheet> {
    xlsx::load_config_sheets(path, xlsx::DEFAULT_SHEET_FILTER).unwrap()
}

#[test]
fn test_config_sheet_filter() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_book(
        &dir,
        vec![
            ("Cover", vec![(0, 0, Value::Text("表紙"))]),
            ("Config-A", config_cells("PN001", "PN002")),
            ("Notes", vec![(0, 0, Value::Text("memo"))]),
            ("SYSTEM CONFIG", config_cells("PN003", "PN004")),
        ],
    );

    assert_eq!(xlsx::sheet_names(&path).unwrap().len(), 4);
    let names = xlsx::config_sheet_names(&path, "config").unwrap();
    assert_eq!(names, vec!["Config-A".to_string(), "SYSTEM CONFIG".to_string()]);

    let sheets = load_all(&path);
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].name(), "Config-A");
}

#[test]
fn test_no_config_sheets() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_book(&dir, vec![("Cover", vec![(0, 0, Value::Text("表紙"))])]);

    let err = xlsx::load_config_sheets(&path, "config").unwrap_err();
    assert!(matches!(err, ConfigLensError::NoConfigSheets { .. }));
}

#[test]
fn test_sheet_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_book(&dir, vec![("Config", config_cells("PN001", "PN002"))]);

    let err = xlsx::load_worksheet(&path, "Missing").unwrap_err();
    assert!(matches!(err, ConfigLensError::SheetNotFound(name) if name == "Missing"));
}

#[test]
fn test_cells_keep_absolute_position() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_book(
        &dir,
        vec![("Config", vec![(4, 3, Value::Text("first")), (6, 5, Value::Number(2.5))])],
    );

    let sheet = xlsx::load_worksheet(&path, "Config").unwrap();
    assert_eq!(sheet.cell(4, 3), Some("first"));
    assert_eq!(sheet.cell(6, 5), Some("2.5"));
    assert_eq!(sheet.cell(0, 0), None);
    assert_eq!(sheet.row_count(), 7);
    assert_eq!(sheet.column_count(), 6);
}

#[test]
fn test_numbers_resolved_to_text() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_book(&dir, vec![("Config", config_cells("PN001", "PN002"))]);

    let sheet = xlsx::load_worksheet(&path, "Config").unwrap();
    assert_eq!(sheet.cell(4, 3), Some("16"));
    assert_eq!(sheet.cell(5, 3), Some("15.6"));
}

#[test]
fn test_extract_from_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_book(
        &dir,
        vec![
            ("Config-A", config_cells("PN001", "PN002")),
            ("Config-B", vec![(0, 0, Value::Text("no header here"))]),
        ],
    );

    let sheets = load_all(&path);
    let result = Extractor::default().extract_workbook(&sheets, &(), &CancellationFlag::new());

    assert_eq!(result.dataset.identifiers(), vec!["PN001", "PN002"]);
    assert_eq!(result.reports[1].status, SheetStatus::AnchorNotFound);

    let pn001 = result.dataset.get("PN001").unwrap();
    let memory = &pn001.components("Memory").unwrap()[0];
    assert_eq!(memory.specification, "16");
    assert_eq!(memory.part_number, "MEM-01");
    for category in ["CPU", "Memory", "LCD"] {
        assert_eq!(pn001.components(category).unwrap().len(), 1);
    }
}

#[test]
fn test_whitespace_label_cell_does_not_end_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cells = config_cells("PN001", "PN002");
    cells.extend([
        (6, 0, Value::Text("   ")),
        (7, 0, Value::Text("SSD 512GB")),
        (7, 3, Value::Text("NVMe 512GB")),
        (7, 4, Value::Text("SSD-01")),
    ]);
    let path = write_book(&dir, vec![("Config", cells)]);

    let sheet = xlsx::load_worksheet(&path, "Config").unwrap();
    assert_eq!(sheet.cell(6, 0), Some("   "));

    let result = Extractor::default().extract_workbook(&[sheet], &(), &CancellationFlag::new());
    let pn001 = result.dataset.get("PN001").unwrap();
    let ssd = pn001.components("SSD").unwrap();
    assert_eq!(ssd.len(), 1);
    assert_eq!(ssd[0].specification, "NVMe 512GB");
    assert_eq!(ssd[0].part_number, "SSD-01");
    // PN002 は SSD 行が未入力
    assert!(result.dataset.get("PN002").unwrap().components("SSD").unwrap().is_empty());
}
