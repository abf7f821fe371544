//! 構成データの型定義
//!
//! - ComponentRecord: 1部品の値（名称・仕様・P/N）
//! - IdentifierRecord: 識別子（System P/N）1列分の構成
//! - MatchedComponent: 表示用に選択された部品

use serde::{Deserialize, Serialize};

/// 部品1件
///
/// 欠損値は空文字列で表す（Optionにはしない）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub name: String,
    pub specification: String,
    pub part_number: String,
}

impl ComponentRecord {
    pub fn new(
        name: impl Into<String>,
        specification: impl Into<String>,
        part_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            specification: specification.into(),
            part_number: part_number.into(),
        }
    }

    /// 重複判定キー（名称 + P/N）
    pub fn identity_key(&self) -> (String, String) {
        (self.name.clone(), self.part_number.clone())
    }
}

/// カテゴリごとの部品リスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryComponents {
    pub category: String,
    pub components: Vec<ComponentRecord>,
}

/// 識別子1件分の構成
///
/// 宣言済みカテゴリは部品が無くても空リストとして必ず存在する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierRecord {
    pub identifier: String,
    /// 抽出元ワークシート名
    pub sheet: String,
    /// 抽出元の列番号（0始まり）
    pub column: usize,
    pub categories: Vec<CategoryComponents>,
}

impl IdentifierRecord {
    /// 全カテゴリを空リストで初期化
    pub fn new<S: AsRef<str>>(
        identifier: impl Into<String>,
        sheet: impl Into<String>,
        column: usize,
        categories: &[S],
    ) -> Self {
        Self {
            identifier: identifier.into(),
            sheet: sheet.into(),
            column,
            categories: categories
                .iter()
                .map(|c| CategoryComponents {
                    category: c.as_ref().to_string(),
                    components: Vec::new(),
                })
                .collect(),
        }
    }

    /// カテゴリの部品一覧（未宣言カテゴリはNone）
    pub fn components(&self, category: &str) -> Option<&[ComponentRecord]> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.components.as_slice())
    }

    /// 部品を追加（未宣言カテゴリは末尾に作成）
    pub fn push(&mut self, category: &str, record: ComponentRecord) {
        match self.categories.iter_mut().find(|c| c.category == category) {
            Some(bucket) => bucket.components.push(record),
            None => self.categories.push(CategoryComponents {
                category: category.to_string(),
                components: vec![record],
            }),
        }
    }

    /// 全カテゴリの部品を走査（カテゴリ順・行順）
    pub fn iter_components(&self) -> impl Iterator<Item = (&str, &ComponentRecord)> {
        self.categories
            .iter()
            .flat_map(|c| c.components.iter().map(move |r| (c.category.as_str(), r)))
    }

    /// 部品総数
    pub fn component_count(&self) -> usize {
        self.categories.iter().map(|c| c.components.len()).sum()
    }
}

/// 表示用に選択された部品
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedComponent {
    pub category: String,
    pub name: String,
    pub specification: String,
    pub part_number: String,
}

impl MatchedComponent {
    pub fn from_record(category: &str, record: &ComponentRecord) -> Self {
        Self {
            category: category.to_string(),
            name: record.name.clone(),
            specification: record.specification.clone(),
            part_number: record.part_number.clone(),
        }
    }

    pub fn identity_key(&self) -> (String, String) {
        (self.name.clone(), self.part_number.clone())
    }
}
