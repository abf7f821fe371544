//! 対話式の識別子選択

use crate::dataset::Dataset;
use crate::error::{ConfigLensError, Result};
use dialoguer::Select;

/// 選択肢の表示文字列（識別子 + シート名）
pub fn identifier_labels(dataset: &Dataset) -> Vec<String> {
    dataset
        .records()
        .iter()
        .map(|r| format!("{}  ({}, {}件)", r.identifier, r.sheet, r.component_count()))
        .collect()
}

/// 識別子を選ばせる（1件だけならそのまま返す）
pub fn select_identifier(dataset: &Dataset) -> Result<String> {
    let ids = dataset.identifiers();
    match ids.len() {
        0 => return Err(ConfigLensError::UnknownIdentifier("(識別子なし)".into())),
        1 => return Ok(ids[0].to_string()),
        _ => {}
    }

    let labels = identifier_labels(dataset);
    let index = Select::new()
        .with_prompt("System P/N を選択")
        .items(&labels)
        .default(0)
        .max_length(20)
        .interact()
        .map_err(|e| ConfigLensError::Prompt(e.to_string()))?;

    Ok(ids[index].to_string())
}
