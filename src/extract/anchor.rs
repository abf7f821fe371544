//! 見出しアンカー検出
//!
//! 左上の限られた範囲から `System P/N` 見出しセルを探す。
//! 1. 完全一致（前後空白除去、大文字小文字区別）
//! 2. 見つからなければ部分一致（"system"・"p"・"n" をすべて含む）

use crate::worksheet::WorksheetAccessor;
use serde::Serialize;

/// 見出しの既定文字列
pub const DEFAULT_HEADER_TOKEN: &str = "System P/N";

/// 走査する最大行数
pub const DEFAULT_SCAN_ROWS: usize = 30;

/// 完全一致で走査する最大列数
pub const DEFAULT_SCAN_COLUMNS: usize = 10;

/// 部分一致で必要な文字列（小文字）
const FUZZY_NEEDLES: &[&str] = &["system", "p", "n"];

/// 見出し行と識別子列の開始位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    pub header_row: usize,
    pub identifier_start_column: usize,
}

/// どちらの走査で見つかったか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnchorPass {
    Exact,
    Fuzzy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorHit {
    pub anchor: Anchor,
    pub pass: AnchorPass,
}

#[derive(Debug, Clone)]
pub struct AnchorLocator {
    header_token: String,
    scan_rows: usize,
    scan_columns: usize,
}

impl Default for AnchorLocator {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_TOKEN, DEFAULT_SCAN_ROWS, DEFAULT_SCAN_COLUMNS)
    }
}

impl AnchorLocator {
    pub fn new(header_token: impl Into<String>, scan_rows: usize, scan_columns: usize) -> Self {
        Self {
            header_token: header_token.into(),
            scan_rows,
            scan_columns,
        }
    }

    /// アンカーを探す（見つからなければNone）
    pub fn locate<W: WorksheetAccessor + ?Sized>(&self, sheet: &W) -> Option<AnchorHit> {
        if let Some(anchor) = self.exact_pass(sheet) {
            tracing::debug!(sheet = sheet.name(), ?anchor, "見出しを完全一致で検出");
            return Some(AnchorHit {
                anchor,
                pass: AnchorPass::Exact,
            });
        }

        if let Some(anchor) = self.fuzzy_pass(sheet) {
            tracing::debug!(sheet = sheet.name(), ?anchor, "見出しを部分一致で検出");
            return Some(AnchorHit {
                anchor,
                pass: AnchorPass::Fuzzy,
            });
        }

        tracing::debug!(sheet = sheet.name(), "見出しが見つかりません");
        None
    }

    fn exact_pass<W: WorksheetAccessor + ?Sized>(&self, sheet: &W) -> Option<Anchor> {
        let rows = self.scan_rows.min(sheet.row_count());
        let cols = self.scan_columns.min(sheet.column_count());

        for row in 0..rows {
            for col in 0..cols {
                if sheet.text(row, col).trim() == self.header_token {
                    return Some(Anchor {
                        header_row: row,
                        identifier_start_column: col,
                    });
                }
            }
        }
        None
    }

    /// 行全体を走査する
    fn fuzzy_pass<W: WorksheetAccessor + ?Sized>(&self, sheet: &W) -> Option<Anchor> {
        let rows = self.scan_rows.min(sheet.row_count());
        let cols = sheet.column_count();

        for row in 0..rows {
            for col in 0..cols {
                let lower = sheet.text(row, col).to_lowercase();
                if FUZZY_NEEDLES.iter().all(|needle| lower.contains(needle)) {
                    return Some(Anchor {
                        header_row: row,
                        identifier_start_column: col,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet::Worksheet;
    use std::cell::Cell;

    /// 読み取り列の最大値を記録するスパイ
    struct SpySheet {
        inner: Worksheet,
        widest_read: Cell<usize>,
    }

    impl WorksheetAccessor for SpySheet {
        fn name(&self) -> &str {
            self.inner.name()
        }
        fn row_count(&self) -> usize {
            self.inner.row_count()
        }
        fn column_count(&self) -> usize {
            self.inner.column_count()
        }
        fn cell(&self, row: usize, col: usize) -> Option<&str> {
            self.widest_read.set(self.widest_read.get().max(col));
            self.inner.cell(row, col)
        }
    }

    fn grid(rows: usize, cols: usize, cells: &[(usize, usize, &str)]) -> Worksheet {
        let mut sheet = Worksheet::new("Config", rows, cols);
        for (r, c, text) in cells {
            sheet.set(*r, *c, crate::worksheet::CellValue::from_text(*text));
        }
        sheet
    }

    #[test]
    fn test_exact_match() {
        let sheet = grid(10, 6, &[(2, 3, "System P/N"), (5, 1, "system pn")]);
        let hit = AnchorLocator::default().locate(&sheet).unwrap();
        assert_eq!(hit.pass, AnchorPass::Exact);
        assert_eq!(
            hit.anchor,
            Anchor {
                header_row: 2,
                identifier_start_column: 3
            }
        );
    }

    #[test]
    fn test_exact_match_trims_whitespace() {
        let sheet = grid(5, 5, &[(1, 1, "  System P/N \n")]);
        let hit = AnchorLocator::default().locate(&sheet).unwrap();
        assert_eq!(hit.pass, AnchorPass::Exact);
        assert_eq!(hit.anchor.header_row, 1);
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        let sheet = grid(5, 5, &[(1, 1, "SYSTEM P/N")]);
        let hit = AnchorLocator::default().locate(&sheet).unwrap();
        // 大文字違いは部分一致で拾われる
        assert_eq!(hit.pass, AnchorPass::Fuzzy);
    }

    #[test]
    fn test_exact_hit_never_runs_fuzzy_pass() {
        // 完全一致の走査は10列まで。部分一致なら行全体（20列）を読む
        let sheet = SpySheet {
            inner: grid(40, 20, &[(4, 2, "System P/N"), (0, 15, "System PN")]),
            widest_read: Cell::new(0),
        };
        let hit = AnchorLocator::default().locate(&sheet).unwrap();
        assert_eq!(hit.pass, AnchorPass::Exact);
        assert!(sheet.widest_read.get() < DEFAULT_SCAN_COLUMNS);
    }

    #[test]
    fn test_fuzzy_match() {
        let sheet = grid(10, 6, &[(0, 0, "Model"), (3, 2, "System PN No.")]);
        let hit = AnchorLocator::default().locate(&sheet).unwrap();
        assert_eq!(hit.pass, AnchorPass::Fuzzy);
        assert_eq!(
            hit.anchor,
            Anchor {
                header_row: 3,
                identifier_start_column: 2
            }
        );
    }

    #[test]
    fn test_fuzzy_scans_beyond_column_limit() {
        let sheet = grid(5, 15, &[(2, 12, "Sub-system P/N")]);
        let hit = AnchorLocator::default().locate(&sheet).unwrap();
        assert_eq!(hit.pass, AnchorPass::Fuzzy);
        assert_eq!(hit.anchor.identifier_start_column, 12);
    }

    #[test]
    fn test_not_found() {
        let sheet = grid(10, 6, &[(0, 0, "Model"), (1, 1, "Part Number")]);
        assert!(AnchorLocator::default().locate(&sheet).is_none());
    }

    #[test]
    fn test_abbreviated_header_not_matched() {
        // "system" を含まない略記は部分一致の対象外
        let sheet = grid(10, 6, &[(3, 2, "Sys. P/N")]);
        assert!(AnchorLocator::default().locate(&sheet).is_none());
    }

    #[test]
    fn test_outside_scan_rows() {
        let sheet = grid(40, 5, &[(30, 0, "System P/N")]);
        assert!(AnchorLocator::default().locate(&sheet).is_none());

        let wider = AnchorLocator::new(DEFAULT_HEADER_TOKEN, 31, DEFAULT_SCAN_COLUMNS);
        assert!(wider.locate(&sheet).is_some());
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = Worksheet::new("Config", 0, 0);
        assert!(AnchorLocator::default().locate(&sheet).is_none());
    }

    #[test]
    fn test_locate_is_idempotent() {
        let sheet = grid(10, 6, &[(3, 2, "system p n")]);
        let locator = AnchorLocator::default();
        assert_eq!(locator.locate(&sheet), locator.locate(&sheet));
    }
}
