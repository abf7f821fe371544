//! Excelブック読み込み（xlsx / xls / xlsb / ods）
//!
//! calamine のセル値をここで `CellValue` に変換する。

use super::{CellValue, Worksheet};
use crate::error::{ConfigLensError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// 構成シート判定の既定キーワード
pub const DEFAULT_SHEET_FILTER: &str = "config";

/// ブック内の全ワークシート名
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    ensure_exists(path)?;
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names())
}

/// 名前にキーワードを含むシートのみ（大文字小文字無視）
pub fn filter_config_sheets(names: &[String], filter: &str) -> Vec<String> {
    let filter = filter.to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&filter))
        .cloned()
        .collect()
}

/// 構成シート名の一覧（無ければエラー）
pub fn config_sheet_names(path: &Path, filter: &str) -> Result<Vec<String>> {
    let all = sheet_names(path)?;
    tracing::debug!(sheets = ?all, "ワークシート一覧");

    let config_sheets = filter_config_sheets(&all, filter);
    if config_sheets.is_empty() {
        return Err(ConfigLensError::NoConfigSheets {
            path: path.display().to_string(),
            filter: filter.to_string(),
        });
    }

    tracing::info!(count = config_sheets.len(), "構成シートを検出");
    Ok(config_sheets)
}

/// 指定シートを読み込む
pub fn load_worksheet(path: &Path, sheet_name: &str) -> Result<Worksheet> {
    ensure_exists(path)?;
    let mut workbook = open_workbook_auto(path)?;

    if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
        return Err(ConfigLensError::SheetNotFound(sheet_name.to_string()));
    }

    let range = workbook.worksheet_range(sheet_name)?;
    Ok(worksheet_from_range(sheet_name, &range))
}

/// 構成シートをまとめて読み込む
pub fn load_config_sheets(path: &Path, filter: &str) -> Result<Vec<Worksheet>> {
    let names = config_sheet_names(path, filter)?;
    let mut workbook = open_workbook_auto(path)?;

    let mut sheets = Vec::with_capacity(names.len());
    for name in &names {
        let range = workbook.worksheet_range(name)?;
        sheets.push(worksheet_from_range(name, &range));
    }
    Ok(sheets)
}

/// calamine の Range から Worksheet を作る
///
/// データがA1から始まらない場合も絶対位置に置く。
pub fn worksheet_from_range(name: &str, range: &Range<Data>) -> Worksheet {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let (height, width) = range.get_size();

    let mut sheet = Worksheet::new(
        name,
        start_row as usize + height,
        start_col as usize + width,
    );

    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let value = cell_value(cell);
            if value.is_present() {
                sheet.set(
                    start_row as usize + row_idx,
                    start_col as usize + col_idx,
                    value,
                );
            }
        }
    }

    tracing::debug!(sheet = name, rows = height, columns = width, "ワークシート読み込み");
    sheet
}

/// セル値を文字列に解決
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Absent,
        Data::String(s) => CellValue::from_text(s.as_str()),
        Data::Float(n) => {
            // 整数値は小数点なしで表示
            if n.fract() == 0.0 && n.abs() < 1e15 {
                CellValue::Present(format!("{}", *n as i64))
            } else {
                CellValue::Present(format!("{}", n))
            }
        }
        Data::Int(n) => CellValue::Present(n.to_string()),
        Data::Bool(b) => CellValue::Present(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => CellValue::Present(format!("#{:?}", e)),
        other => CellValue::from_text(other.to_string()),
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ConfigLensError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_config_sheets() {
        let names = vec![
            "Cover".to_string(),
            "Config-A".to_string(),
            "SYSTEM CONFIG".to_string(),
            "Notes".to_string(),
        ];
        assert_eq!(
            filter_config_sheets(&names, DEFAULT_SHEET_FILTER),
            vec!["Config-A".to_string(), "SYSTEM CONFIG".to_string()]
        );
        assert!(filter_config_sheets(&names, "bom").is_empty());
    }

    #[test]
    fn test_cell_value_numbers() {
        assert_eq!(cell_value(&Data::Float(16.0)), CellValue::Present("16".into()));
        assert_eq!(cell_value(&Data::Float(15.6)), CellValue::Present("15.6".into()));
        assert_eq!(cell_value(&Data::Int(512)), CellValue::Present("512".into()));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Present("TRUE".into()));
        assert_eq!(cell_value(&Data::Empty), CellValue::Absent);
        assert_eq!(cell_value(&Data::String(String::new())), CellValue::Absent);
    }

    #[test]
    fn test_missing_file() {
        let err = sheet_names(Path::new("/nonexistent/config.xlsx")).unwrap_err();
        assert!(matches!(err, ConfigLensError::FileNotFound(_)));
    }
}
