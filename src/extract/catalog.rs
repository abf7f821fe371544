//! 部品カタログ構築
//!
//! アンカー行の下、A列の部品ラベルを上から読み、カテゴリごとに分類する。
//! 分類は大文字小文字無視の部分一致（1ラベルが複数カテゴリに入ることもある）。

use super::anchor::Anchor;
use crate::worksheet::WorksheetAccessor;
use config_lens_common::category::label_mentions;
use serde::Serialize;

/// 部品ラベルの列
const LABEL_COLUMN: usize = 0;

/// カタログ内の1ラベル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub raw_label: String,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogBucket {
    pub category: String,
    pub entries: Vec<CategoryEntry>,
}

/// カテゴリ → ラベル行（宣言順、各リストは行順）
///
/// 1件以上のラベルを持つカテゴリのみバケットを持つ。
/// 宣言済みカテゴリ一覧は下流で全カテゴリを出力するために保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentCatalog {
    categories: Vec<String>,
    buckets: Vec<CatalogBucket>,
}

impl ComponentCatalog {
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn buckets(&self) -> &[CatalogBucket] {
        &self.buckets
    }

    pub fn entries(&self, category: &str) -> &[CategoryEntry] {
        self.buckets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 分類されたラベルの延べ件数
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    /// 許容する連続空行の数（0なら最初の空行で終了）
    blank_row_tolerance: usize,
}

impl CatalogBuilder {
    pub fn new(blank_row_tolerance: usize) -> Self {
        Self {
            blank_row_tolerance,
        }
    }

    pub fn build<W, S>(&self, sheet: &W, anchor: &Anchor, categories: &[S]) -> ComponentCatalog
    where
        W: WorksheetAccessor + ?Sized,
        S: AsRef<str>,
    {
        let mut buckets: Vec<CatalogBucket> = categories
            .iter()
            .map(|c| CatalogBucket {
                category: c.as_ref().to_string(),
                entries: Vec::new(),
            })
            .collect();

        let mut blank_run = 0;
        for row in (anchor.header_row + 1)..sheet.row_count() {
            let Some(label) = sheet.cell(row, LABEL_COLUMN) else {
                blank_run += 1;
                if blank_run > self.blank_row_tolerance {
                    tracing::debug!(sheet = sheet.name(), row, "空行で部品一覧の終端");
                    break;
                }
                continue;
            };
            // 空白だけのセルは読み飛ばす（終端にはしない、連続空行数も変えない）
            let label = label.trim();
            if label.is_empty() {
                continue;
            }
            blank_run = 0;

            for bucket in buckets.iter_mut() {
                if label_mentions(label, &bucket.category) {
                    bucket.entries.push(CategoryEntry {
                        raw_label: label.to_string(),
                        row,
                    });
                }
            }
        }

        let catalog = ComponentCatalog {
            categories: categories.iter().map(|c| c.as_ref().to_string()).collect(),
            buckets: buckets.into_iter().filter(|b| !b.entries.is_empty()).collect(),
        };
        tracing::debug!(
            sheet = sheet.name(),
            buckets = catalog.buckets.len(),
            entries = catalog.entry_count(),
            "部品カタログ構築"
        );
        catalog
    }
}
