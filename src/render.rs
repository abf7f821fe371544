//! 表示整形モジュール
//!
//! 識別子の構成から 選択 → 左右振り分け → 仕様の切り詰め を行い、
//! 2列（部品名 / 仕様 / P/N ×2）のグリッドを作る。

use crate::extract::{ProgressObserver, Stage};
use config_lens_common::{
    select, split, AliasTable, DisplayGrid, FitStrategy, IdentifierRecord, MatchedComponent,
    SpecFormatter,
};
use serde::Serialize;

// ============================================
// 列幅 → 文字数
// ============================================

/// 予算の下限（文字数）
pub const MIN_BUDGET: usize = 80;

/// 平均文字幅に対する既定の係数
pub const CHAR_WIDTH_RATIO: f32 = 0.7;

/// 既定の余白（文字数）
pub const DEFAULT_MARGIN: usize = 3;

/// 表示列の寸法
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMetrics {
    pub pixel_width: f32,
    pub avg_char_width: f32,
    pub margin: usize,
}

impl ColumnMetrics {
    /// フォントの x 幅から平均文字幅を見積もる
    pub fn from_x_width(pixel_width: f32, x_width: f32) -> Self {
        Self {
            pixel_width,
            avg_char_width: x_width * CHAR_WIDTH_RATIO,
            margin: DEFAULT_MARGIN,
        }
    }

    /// 仕様欄の文字数予算（下限 80）
    pub fn budget(&self) -> usize {
        if self.avg_char_width <= 0.0 || self.pixel_width <= 0.0 {
            return MIN_BUDGET;
        }
        let chars = (self.pixel_width / self.avg_char_width).floor() as usize;
        chars.saturating_sub(self.margin).max(MIN_BUDGET)
    }
}

/// 左右の列の予算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBudget {
    pub left: usize,
    pub right: usize,
}

impl GridBudget {
    pub fn uniform(budget: usize) -> Self {
        Self {
            left: budget,
            right: budget,
        }
    }
}

// ============================================
// 描画
// ============================================

/// 表示セル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCell {
    pub category: String,
    pub name: String,
    pub display_spec: String,
    /// ツールチップ用の全文
    pub full_spec: String,
    pub part_number: String,
    pub strategy: FitStrategy,
}

impl RenderedCell {
    fn new(component: MatchedComponent, formatter: &SpecFormatter, budget: usize) -> Self {
        let fitted = formatter.fit(&component.specification, &component.category, budget);
        Self {
            category: component.category,
            name: component.name,
            display_spec: fitted.display,
            full_spec: fitted.full,
            part_number: component.part_number,
            strategy: fitted.strategy,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.strategy != FitStrategy::Untruncated
    }
}

/// 識別子1件分の表示グリッドを作る
pub fn render<S: AsRef<str>>(
    record: &IdentifierRecord,
    categories: &[S],
    aliases: &AliasTable,
    formatter: &SpecFormatter,
    budget: GridBudget,
    observer: &dyn ProgressObserver,
) -> DisplayGrid<RenderedCell> {
    let matches = select(record, categories, aliases);
    let grid = split(matches);

    let grid = DisplayGrid {
        left: grid
            .left
            .into_iter()
            .map(|c| RenderedCell::new(c, formatter, budget.left))
            .collect(),
        right: grid
            .right
            .into_iter()
            .map(|c| RenderedCell::new(c, formatter, budget.right))
            .collect(),
    };

    tracing::debug!(
        identifier = %record.identifier,
        cells = grid.len(),
        truncated = grid.iter().filter(|c| c.is_truncated()).count(),
        "表示整形"
    );
    observer.on_stage(&record.sheet, Stage::FormattingComplete);
    grid
}

// ============================================
// テキスト表
// ============================================

const HEADERS: [&str; 3] = ["Component", "Specification", "P/N"];

/// 端末向けの6列テキスト表
///
/// `full` のときは切り詰め前の全文を表示する。
pub fn to_text_table(grid: &DisplayGrid<RenderedCell>, full: bool) -> String {
    let cells = |cell: Option<&RenderedCell>| -> [String; 3] {
        match cell {
            Some(c) => [
                c.name.clone(),
                if full { c.full_spec.clone() } else { c.display_spec.clone() },
                c.part_number.clone(),
            ],
            None => Default::default(),
        }
    };

    let mut rows: Vec<[String; 6]> = Vec::with_capacity(grid.row_count() + 1);
    rows.push([
        HEADERS[0].into(),
        HEADERS[1].into(),
        HEADERS[2].into(),
        HEADERS[0].into(),
        HEADERS[1].into(),
        HEADERS[2].into(),
    ]);
    for (left, right) in grid.rows() {
        let [a, b, c] = cells(left);
        let [d, e, f] = cells(right);
        rows.push([a, b, c, d, e, f]);
    }

    let mut widths = [0usize; 6];
    for row in &rows {
        for (w, text) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(text.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(text, w)| format!("{:<width$}", text, width = *w))
            .collect();
        let (left, right) = line.split_at(3);
        out.push_str(&format!("{} | {}", left.join("  "), right.join("  ")).trim_end());
        out.push('\n');
    }
    out
}
