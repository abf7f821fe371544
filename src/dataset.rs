//! 抽出結果（識別子 → 構成）
//!
//! 同じ識別子が複数列・複数シートに現れた場合は `DuplicatePolicy` で解決し、
//! どのポリシーでも衝突は記録する。

use crate::error::{ConfigLensError, Result};
use config_lens_common::IdentifierRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 識別子重複時の扱い
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// 後から読んだ列で上書き
    #[default]
    LastWins,
    /// 最初に読んだ列を残す
    FirstWins,
    /// 最初の列を残し、衝突として報告
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lastwins" | "last-wins" | "last" => Ok(DuplicatePolicy::LastWins),
            "firstwins" | "first-wins" | "first" => Ok(DuplicatePolicy::FirstWins),
            "reject" => Ok(DuplicatePolicy::Reject),
            _ => Err(format!(
                "Unknown duplicate policy: {}. Use last-wins, first-wins, or reject",
                s
            )),
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::LastWins => write!(f, "last-wins"),
            DuplicatePolicy::FirstWins => write!(f, "first-wins"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// 抽出元の位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceColumn {
    pub sheet: String,
    pub column: usize,
}

impl SourceColumn {
    fn of(record: &IdentifierRecord) -> Self {
        Self {
            sheet: record.sheet.clone(),
            column: record.column,
        }
    }
}

/// 識別子の重複
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierConflict {
    pub identifier: String,
    pub kept: SourceColumn,
    pub discarded: SourceColumn,
    pub policy: DuplicatePolicy,
}

/// 識別子 → 構成（挿入順を保持）
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    records: Vec<IdentifierRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    conflicts: Vec<IdentifierConflict>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1件追加（重複時はポリシーに従う）
    pub fn insert(&mut self, record: IdentifierRecord, policy: DuplicatePolicy) {
        let Some(&pos) = self.index.get(&record.identifier) else {
            self.index.insert(record.identifier.clone(), self.records.len());
            self.records.push(record);
            return;
        };

        let existing = &self.records[pos];
        let conflict = match policy {
            DuplicatePolicy::LastWins => IdentifierConflict {
                identifier: record.identifier.clone(),
                kept: SourceColumn::of(&record),
                discarded: SourceColumn::of(existing),
                policy,
            },
            DuplicatePolicy::FirstWins | DuplicatePolicy::Reject => IdentifierConflict {
                identifier: record.identifier.clone(),
                kept: SourceColumn::of(existing),
                discarded: SourceColumn::of(&record),
                policy,
            },
        };

        if policy == DuplicatePolicy::Reject {
            tracing::warn!(
                identifier = %conflict.identifier,
                kept = ?conflict.kept,
                rejected = ?conflict.discarded,
                "識別子の重複を拒否"
            );
        } else {
            tracing::debug!(identifier = %conflict.identifier, %policy, "識別子の重複");
        }

        if policy == DuplicatePolicy::LastWins {
            self.records[pos] = record;
        }
        self.conflicts.push(conflict);
    }

    /// 別の抽出結果を取り込む（衝突履歴も引き継ぐ）
    pub fn merge(&mut self, other: Dataset, policy: DuplicatePolicy) {
        self.conflicts.extend(other.conflicts);
        for record in other.records {
            self.insert(record, policy);
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&IdentifierRecord> {
        self.index.get(identifier).map(|&pos| &self.records[pos])
    }

    /// 識別子を取得（無ければ UnknownIdentifier）
    pub fn require(&self, identifier: &str) -> Result<&IdentifierRecord> {
        self.get(identifier)
            .ok_or_else(|| ConfigLensError::UnknownIdentifier(identifier.to_string()))
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.identifier.as_str()).collect()
    }

    pub fn identifiers_in_sheet(&self, sheet: &str) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.sheet == sheet)
            .map(|r| r.identifier.as_str())
            .collect()
    }

    pub fn records(&self) -> &[IdentifierRecord] {
        &self.records
    }

    pub fn conflicts(&self) -> &[IdentifierConflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_lens_common::ComponentRecord;

    fn record(id: &str, sheet: &str, column: usize, spec: &str) -> IdentifierRecord {
        let mut r = IdentifierRecord::new(id, sheet, column, &["CPU"]);
        r.push("CPU", ComponentRecord::new("CPU", spec, ""));
        r
    }

    fn cpu_spec(dataset: &Dataset, id: &str) -> String {
        dataset.get(id).unwrap().components("CPU").unwrap()[0]
            .specification
            .clone()
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut dataset = Dataset::new();
        dataset.insert(record("PN002", "Config", 5, "i5"), DuplicatePolicy::default());
        dataset.insert(record("PN001", "Config", 3, "i7"), DuplicatePolicy::default());
        assert_eq!(dataset.identifiers(), vec!["PN002", "PN001"]);
        assert_eq!(dataset.len(), 2);
        assert!(dataset.conflicts().is_empty());
    }

    #[test]
    fn test_last_wins() {
        let mut dataset = Dataset::new();
        dataset.insert(record("PN001", "Config", 3, "old"), DuplicatePolicy::LastWins);
        dataset.insert(record("PN001", "Config", 7, "new"), DuplicatePolicy::LastWins);

        assert_eq!(dataset.len(), 1);
        assert_eq!(cpu_spec(&dataset, "PN001"), "new");
        let conflict = &dataset.conflicts()[0];
        assert_eq!(conflict.kept.column, 7);
        assert_eq!(conflict.discarded.column, 3);
    }

    #[test]
    fn test_first_wins() {
        let mut dataset = Dataset::new();
        dataset.insert(record("PN001", "Config", 3, "old"), DuplicatePolicy::FirstWins);
        dataset.insert(record("PN001", "Config", 7, "new"), DuplicatePolicy::FirstWins);
        assert_eq!(cpu_spec(&dataset, "PN001"), "old");
        assert_eq!(dataset.conflicts().len(), 1);
    }

    #[test]
    fn test_reject_keeps_first_and_reports() {
        let mut dataset = Dataset::new();
        dataset.insert(record("PN001", "Config A", 3, "old"), DuplicatePolicy::Reject);
        dataset.insert(record("PN001", "Config B", 3, "new"), DuplicatePolicy::Reject);

        assert_eq!(cpu_spec(&dataset, "PN001"), "old");
        let conflict = &dataset.conflicts()[0];
        assert_eq!(conflict.policy, DuplicatePolicy::Reject);
        assert_eq!(conflict.kept.sheet, "Config A");
        assert_eq!(conflict.discarded.sheet, "Config B");
    }

    #[test]
    fn test_merge_across_sheets() {
        let mut first = Dataset::new();
        first.insert(record("PN001", "Config A", 3, "a"), DuplicatePolicy::LastWins);
        first.insert(record("PN002", "Config A", 4, "a"), DuplicatePolicy::LastWins);

        let mut second = Dataset::new();
        second.insert(record("PN002", "Config B", 3, "b"), DuplicatePolicy::LastWins);
        second.insert(record("PN003", "Config B", 4, "b"), DuplicatePolicy::LastWins);

        first.merge(second, DuplicatePolicy::LastWins);
        assert_eq!(first.identifiers(), vec!["PN001", "PN002", "PN003"]);
        assert_eq!(cpu_spec(&first, "PN002"), "b");
        assert_eq!(first.identifiers_in_sheet("Config B"), vec!["PN002", "PN003"]);
        assert_eq!(first.conflicts().len(), 1);
    }

    #[test]
    fn test_require_unknown() {
        let dataset = Dataset::new();
        let err = dataset.require("PN404").unwrap_err();
        assert!(matches!(err, ConfigLensError::UnknownIdentifier(id) if id == "PN404"));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("reject".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Reject);
        assert_eq!("First-Wins".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::FirstWins);
        assert!("merge".parse::<DuplicatePolicy>().is_err());
    }

    #[test]
    fn test_serialize_skips_index() {
        let mut dataset = Dataset::new();
        dataset.insert(record("PN001", "Config", 3, "i7"), DuplicatePolicy::LastWins);
        let json = serde_json::to_value(&dataset).unwrap();
        assert!(json.get("index").is_none());
        assert_eq!(json["records"][0]["identifier"], "PN001");
        assert_eq!(json["records"][0]["categories"][0]["components"][0]["specification"], "i7");
    }
}
