//! 端末向けの進捗表示

use crate::extract::{ProgressObserver, Stage};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// シート数を総数とするバー
    pub fn new(sheets: usize) -> Self {
        let bar = ProgressBar::new(sheets as u64);
        let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    /// 表示なし（非端末・テスト用）
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ProgressReporter {
    fn on_stage(&self, sheet: &str, stage: Stage) {
        self.bar.set_message(format!("{}: {}", sheet, stage));
        if stage == Stage::RecordsExtracted {
            self.bar.inc(1);
        }
    }
}
