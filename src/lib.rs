//! Config Lens
//!
//! 構成表ワークシートから識別子（System P/N）ごとの部品構成を抽出し、
//! 固定幅の2列表示に整形する。

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod logging;
pub mod progress;
pub mod prompt;
pub mod render;
pub mod worker;
pub mod worksheet;

pub use dataset::{Dataset, DuplicatePolicy, IdentifierConflict};
pub use error::{ConfigLensError, Result};
pub use extract::{
    CancellationFlag, Extractor, ProgressObserver, SheetOutcome, SheetReport, SheetStatus, Stage,
    WorkbookExtraction,
};
pub use render::{render, to_text_table, ColumnMetrics, GridBudget, RenderedCell};
pub use worker::{ExtractionWorker, RunResult};
pub use worksheet::{CellValue, Worksheet, WorksheetAccessor};
