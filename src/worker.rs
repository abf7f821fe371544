//! バックグラウンド抽出
//!
//! 抽出は同期処理なので blocking スレッドで実行する。
//! 新しい実行を開始すると前の実行はキャンセルされ、
//! 後から完了した古い実行は `Superseded` として結果を捨てる。

use crate::error::{ConfigLensError, Result};
use crate::extract::{CancellationFlag, Extractor, ProgressObserver, WorkbookExtraction};
use crate::worksheet::Worksheet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// 1回の実行結果
#[derive(Debug)]
pub enum RunResult {
    Completed(WorkbookExtraction),
    /// より新しい実行が開始された
    Superseded { generation: u64 },
    Cancelled,
}

pub struct ExtractionWorker {
    extractor: Arc<Extractor>,
    generation: AtomicU64,
    current: Mutex<Option<CancellationFlag>>,
}

impl ExtractionWorker {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
            generation: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// 最新の実行番号
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn run(
        &self,
        sheets: Vec<Worksheet>,
        observer: Arc<dyn ProgressObserver>,
    ) -> Result<RunResult> {
        let (generation, cancel) = self.begin();
        let extractor = Arc::clone(&self.extractor);

        let extraction = tokio::task::spawn_blocking(move || {
            extractor.extract_workbook(&sheets, observer.as_ref(), &cancel)
        })
        .await
        .map_err(|e| ConfigLensError::Worker(e.to_string()))?;

        if self.generation() != generation {
            tracing::debug!(generation, latest = self.generation(), "古い実行結果を破棄");
            return Ok(RunResult::Superseded { generation });
        }
        if extraction.cancelled {
            return Ok(RunResult::Cancelled);
        }
        Ok(RunResult::Completed(extraction))
    }

    /// 実行中の抽出をキャンセル
    pub fn cancel(&self) {
        let current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(flag) = current.as_ref() {
            flag.cancel();
        }
    }

    fn begin(&self) -> (u64, CancellationFlag) {
        let cancel = CancellationFlag::new();
        let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = current.replace(cancel.clone()) {
            previous.cancel();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, cancel)
    }
}
