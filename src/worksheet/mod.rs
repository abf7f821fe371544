//! ワークシートアクセス
//!
//! セル値はロード時に一度だけ `CellValue`（有無 + 文字列）へ解決する。
//! 下流の処理は数値/文字列の違いを意識しない。

pub mod xlsx;

use serde::{Deserialize, Serialize};

/// セル値（ロード時に正規化済み）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Absent,
    Present(String),
}

impl CellValue {
    /// 空文字列は未入力として扱う
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            CellValue::Absent
        } else {
            CellValue::Present(text)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Absent => None,
            CellValue::Present(text) => Some(text),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, CellValue::Present(_))
    }
}

/// 行・列でセルを読めるワークシート
pub trait WorksheetAccessor {
    fn name(&self) -> &str;

    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// セルの文字列（未入力・範囲外はNone）
    fn cell(&self, row: usize, col: usize) -> Option<&str>;

    /// セルの文字列（未入力は空文字列）
    fn text(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).unwrap_or("")
    }

    /// 未入力または空白のみ
    fn is_blank(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).map_or(true, |t| t.trim().is_empty())
    }
}

/// メモリ上のワークシート（読み取り専用スナップショット）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    name: String,
    cells: Vec<Vec<CellValue>>,
    columns: usize,
}

impl Worksheet {
    /// 空のワークシート
    pub fn new(name: impl Into<String>, rows: usize, columns: usize) -> Self {
        Self {
            name: name.into(),
            cells: vec![vec![CellValue::Absent; columns]; rows],
            columns,
        }
    }

    /// 文字列の行から作成（空文字列は未入力）
    pub fn from_rows<R, S>(name: impl Into<String>, rows: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let columns = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut sheet = Self::new(name, rows.len(), columns);
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.as_ref().iter().enumerate() {
                sheet.cells[r][c] = CellValue::from_text(value.as_ref());
            }
        }
        sheet
    }

    /// セルを設定（範囲外なら拡張）
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if col >= self.columns {
            self.columns = col + 1;
            for r in &mut self.cells {
                r.resize(self.columns, CellValue::Absent);
            }
        }
        if row >= self.cells.len() {
            self.cells.resize(row + 1, vec![CellValue::Absent; self.columns]);
        }
        self.cells[row][col] = value;
    }

    pub fn value(&self, row: usize, col: usize) -> &CellValue {
        const ABSENT: &CellValue = &CellValue::Absent;
        self.cells.get(row).and_then(|r| r.get(col)).unwrap_or(ABSENT)
    }
}

impl WorksheetAccessor for Worksheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> usize {
        self.cells.len()
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.value(row, col).as_text()
    }
}
