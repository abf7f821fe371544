//! 構成抽出パイプライン
//!
//! シートごとに アンカー検出 → カタログ構築 → 構成抽出 を順に実行する。
//! 各段階の間でキャンセルを確認し、進捗を observer に通知する。
//! 1シートの失敗は他シートの結果に影響しない。

pub mod anchor;
pub mod catalog;
pub mod record;

use crate::config::Config;
use crate::dataset::{Dataset, DuplicatePolicy};
use crate::worksheet::WorksheetAccessor;
use anchor::{Anchor, AnchorHit, AnchorLocator};
use catalog::{CatalogBuilder, ComponentCatalog};
use record::RecordExtractor;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 進捗チェックポイント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    AnchorFound,
    CatalogBuilt,
    RecordsExtracted,
    FormattingComplete,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::AnchorFound => write!(f, "見出し検出"),
            Stage::CatalogBuilt => write!(f, "部品カタログ構築"),
            Stage::RecordsExtracted => write!(f, "構成抽出"),
            Stage::FormattingComplete => write!(f, "表示整形"),
        }
    }
}

/// 進捗の通知先（ワーカースレッドから呼ばれる）
pub trait ProgressObserver: Send + Sync {
    fn on_stage(&self, sheet: &str, stage: Stage);
}

impl ProgressObserver for () {
    fn on_stage(&self, _sheet: &str, _stage: Stage) {}
}

/// 協調的キャンセル
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// 1シートの抽出結果
#[derive(Debug, Clone)]
pub enum SheetOutcome {
    Extracted {
        anchor: AnchorHit,
        catalog: ComponentCatalog,
        dataset: Dataset,
    },
    AnchorNotFound,
    EmptyCatalog {
        anchor: Anchor,
    },
    Cancelled,
}

impl SheetOutcome {
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            SheetOutcome::Extracted { dataset, .. } => Some(dataset),
            _ => None,
        }
    }
}

/// シートごとの集計
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetReport {
    pub sheet: String,
    pub status: SheetStatus,
    pub identifiers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetStatus {
    Extracted,
    AnchorNotFound,
    EmptyCatalog,
    Cancelled,
}

impl SheetReport {
    fn from_outcome(sheet: &str, outcome: &SheetOutcome) -> Self {
        let status = match outcome {
            SheetOutcome::Extracted { .. } => SheetStatus::Extracted,
            SheetOutcome::AnchorNotFound => SheetStatus::AnchorNotFound,
            SheetOutcome::EmptyCatalog { .. } => SheetStatus::EmptyCatalog,
            SheetOutcome::Cancelled => SheetStatus::Cancelled,
        };
        Self {
            sheet: sheet.to_string(),
            status,
            identifiers: outcome.dataset().map_or(0, Dataset::len),
        }
    }
}

/// ブック全体の抽出結果
#[derive(Debug, Clone, Default)]
pub struct WorkbookExtraction {
    pub dataset: Dataset,
    pub reports: Vec<SheetReport>,
    pub cancelled: bool,
}

/// 抽出の設定一式
#[derive(Debug, Clone)]
pub struct Extractor {
    locator: AnchorLocator,
    catalog: CatalogBuilder,
    records: RecordExtractor,
    categories: Vec<String>,
    policy: DuplicatePolicy,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Extractor {
    pub fn from_config(config: &Config) -> Self {
        Self {
            locator: AnchorLocator::new(&config.header_token, config.scan_rows, config.scan_columns),
            catalog: CatalogBuilder::new(config.blank_row_tolerance),
            records: RecordExtractor::new(&config.header_token, config.duplicate_policy),
            categories: config.categories.clone(),
            policy: config.duplicate_policy,
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// 1シートを抽出
    pub fn extract_sheet<W: WorksheetAccessor + ?Sized>(
        &self,
        sheet: &W,
        observer: &dyn ProgressObserver,
        cancel: &CancellationFlag,
    ) -> SheetOutcome {
        let name = sheet.name();
        if cancel.is_cancelled() {
            return SheetOutcome::Cancelled;
        }

        let Some(hit) = self.locator.locate(sheet) else {
            tracing::warn!(sheet = name, "System P/N 見出しが見つかりません");
            return SheetOutcome::AnchorNotFound;
        };
        observer.on_stage(name, Stage::AnchorFound);
        if cancel.is_cancelled() {
            return SheetOutcome::Cancelled;
        }

        let catalog = self.catalog.build(sheet, &hit.anchor, &self.categories);
        if catalog.is_empty() {
            tracing::warn!(sheet = name, row = hit.anchor.header_row, "部品一覧が見つかりません");
            return SheetOutcome::EmptyCatalog { anchor: hit.anchor };
        }
        observer.on_stage(name, Stage::CatalogBuilt);
        if cancel.is_cancelled() {
            return SheetOutcome::Cancelled;
        }

        let dataset = self.records.extract(sheet, &hit.anchor, &catalog);
        if cancel.is_cancelled() {
            return SheetOutcome::Cancelled;
        }
        observer.on_stage(name, Stage::RecordsExtracted);

        tracing::info!(
            sheet = name,
            identifiers = dataset.len(),
            components = catalog.entry_count(),
            "シート抽出完了"
        );
        SheetOutcome::Extracted {
            anchor: hit,
            catalog,
            dataset,
        }
    }

    /// 複数シートを抽出して1つのデータセットにまとめる
    pub fn extract_workbook<W: WorksheetAccessor>(
        &self,
        sheets: &[W],
        observer: &dyn ProgressObserver,
        cancel: &CancellationFlag,
    ) -> WorkbookExtraction {
        let mut result = WorkbookExtraction::default();

        for sheet in sheets {
            let outcome = self.extract_sheet(sheet, observer, cancel);
            result.reports.push(SheetReport::from_outcome(sheet.name(), &outcome));

            match outcome {
                SheetOutcome::Extracted { dataset, .. } => {
                    result.dataset.merge(dataset, self.policy);
                }
                SheetOutcome::Cancelled => {
                    // 途中結果は返さない
                    tracing::info!(sheet = sheet.name(), "抽出をキャンセル");
                    return WorkbookExtraction {
                        dataset: Dataset::new(),
                        reports: result.reports,
                        cancelled: true,
                    };
                }
                SheetOutcome::AnchorNotFound | SheetOutcome::EmptyCatalog { .. } => {}
            }
        }

        if !result.dataset.conflicts().is_empty() {
            tracing::warn!(
                conflicts = result.dataset.conflicts().len(),
                policy = %self.policy,
                "重複した識別子があります"
            );
        }
        result
    }
}
