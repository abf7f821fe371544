//! 識別子列ごとの構成抽出
//!
//! 見出し行の各列を識別子列とみなし、カタログの各ラベル行から
//! 仕様（同じ列）とP/N（右隣の列）を読む。
//! 見出し文字列そのもの（`System P/N`）は識別子として扱わない。

use super::anchor::{Anchor, DEFAULT_HEADER_TOKEN};
use super::catalog::ComponentCatalog;
use crate::dataset::{Dataset, DuplicatePolicy};
use crate::worksheet::WorksheetAccessor;
use config_lens_common::{ComponentRecord, IdentifierRecord};

#[derive(Debug, Clone)]
pub struct RecordExtractor {
    header_token: String,
    policy: DuplicatePolicy,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_TOKEN, DuplicatePolicy::default())
    }
}

impl RecordExtractor {
    pub fn new(header_token: impl Into<String>, policy: DuplicatePolicy) -> Self {
        Self {
            header_token: header_token.into(),
            policy,
        }
    }

    pub fn extract<W: WorksheetAccessor + ?Sized>(
        &self,
        sheet: &W,
        anchor: &Anchor,
        catalog: &ComponentCatalog,
    ) -> Dataset {
        let mut dataset = Dataset::new();

        for col in anchor.identifier_start_column..sheet.column_count() {
            if sheet.is_blank(anchor.header_row, col) {
                continue;
            }
            let identifier = sheet.text(anchor.header_row, col).trim();
            if identifier == self.header_token {
                continue;
            }
            let record = self.extract_column(sheet, identifier, col, catalog);
            tracing::trace!(
                identifier,
                column = col,
                components = record.component_count(),
                "識別子列を抽出"
            );
            dataset.insert(record, self.policy);
        }

        tracing::debug!(sheet = sheet.name(), identifiers = dataset.len(), "構成抽出");
        dataset
    }

    fn extract_column<W: WorksheetAccessor + ?Sized>(
        &self,
        sheet: &W,
        identifier: &str,
        col: usize,
        catalog: &ComponentCatalog,
    ) -> IdentifierRecord {
        let mut record = IdentifierRecord::new(identifier, sheet.name(), col, catalog.categories());

        for bucket in catalog.buckets() {
            for entry in &bucket.entries {
                // 仕様が未入力の行はこの識別子では採用しない
                let Some(spec) = sheet.cell(entry.row, col) else {
                    continue;
                };
                let part_number = sheet.text(entry.row, col + 1);
                record.push(
                    &bucket.category,
                    ComponentRecord::new(&entry.raw_label, spec.trim(), part_number.trim()),
                );
            }
        }
        record
    }
}
