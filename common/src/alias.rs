//! エイリアス定義モジュール
//!
//! カテゴリごとの部品名の表記ゆれ（同義語）を管理する。
//! 表示選択（matcher）で前方一致の候補として使う。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// カテゴリ → 同義語リスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: HashMap<String, Vec<String>>,
}

impl AliasTable {
    /// 組み込みの同義語表
    pub fn builtin() -> Self {
        let entries: &[(&str, &[&str])] = &[
            ("CPU", &["cpu", "processor", "central"]),
            ("GPU", &["gpu", "graphics", "vga"]),
            ("Memory", &["memory", "ram", "dimm", "ddr"]),
            ("LCD", &["lcd", "display", "screen", "monitor", "panel"]),
            ("WLAN", &["wlan", "wifi", "wireless"]),
            ("WWAN", &["wwan", "cellular", "mobile"]),
            ("SSD", &["ssd", "solid", "nvme"]),
            ("Battery", &["battery", "batt", "accu"]),
            (
                "Adaptor",
                &["adaptor", "adapter", "power adapter", "ac adapter", "charger", "ac power"],
            ),
            ("KeyBoard", &["keyboard", "kb"]),
            ("USH", &["ush"]),
            ("Finger Print", &["finger print", "fingerprint", "finger"]),
            ("Smart Card", &["smart card", "smartcard", "smart"]),
            ("RFID", &["rfid", "nfc", "near field", "contactless", "rfid/nfc"]),
            ("FIPS", &["fips"]),
        ];

        let mut table = Self::default();
        for (category, aliases) in entries {
            table.extend(category, aliases.iter().copied());
        }
        table
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み（`{"Category": ["alias", ...]}`）
    ///
    /// カテゴリ名が空のエントリはどのカテゴリにも当たらないためエラーにする。
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        if table.aliases.keys().any(|category| category.trim().is_empty()) {
            return Err(Error::Config("エイリアス定義に空のカテゴリ名があります".to_string()));
        }
        Ok(table)
    }

    /// 同義語を追加（重複は無視）
    pub fn extend<'a>(&mut self, category: &str, aliases: impl IntoIterator<Item = &'a str>) {
        let list = self.aliases.entry(category.to_string()).or_default();
        for alias in aliases {
            let alias = alias.trim().to_lowercase();
            if !alias.is_empty() && !list.contains(&alias) {
                list.push(alias);
            }
        }
    }

    /// 設定をマージ（後から追加した同義語は末尾に追加）
    pub fn merge(&mut self, other: &AliasTable) {
        for (category, aliases) in &other.aliases {
            self.extend(category, aliases.iter().map(|s| s.as_str()));
        }
    }

    /// カテゴリの同義語（完全一致を優先、無ければ大文字小文字無視）
    pub fn get(&self, category: &str) -> &[String] {
        if let Some(list) = self.aliases.get(category) {
            return list;
        }
        self.aliases
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(category))
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::DEFAULT_CATEGORIES;

    #[test]
    fn test_builtin_covers_every_category() {
        let table = AliasTable::builtin();
        for category in DEFAULT_CATEGORIES {
            assert!(!table.get(category).is_empty(), "同義語なし: {}", category);
        }
        assert_eq!(table.get("Adaptor").len(), 6);
    }

    #[test]
    fn test_get_case_insensitive() {
        let table = AliasTable::builtin();
        assert_eq!(table.get("keyboard"), table.get("KeyBoard"));
        assert!(table.get("Unknown").is_empty());
    }

    #[test]
    fn test_merge_normalizes_json_aliases() {
        let table = AliasTable::from_json(r#"{"LCD": ["Touch Panel", "OLED"]}"#).unwrap();
        // JSONの値はそのまま保持される
        assert_eq!(table.get("LCD"), &["Touch Panel".to_string(), "OLED".to_string()]);

        let mut merged = AliasTable::default();
        merged.merge(&table);
        assert_eq!(merged.get("LCD"), &["touch panel".to_string(), "oled".to_string()]);
    }

    #[test]
    fn test_merge_appends_and_dedups() {
        let mut table = AliasTable::builtin();
        let custom = AliasTable::from_json(r#"{"Memory": ["RAM", "sodimm"], "Camera": ["cam"]}"#)
            .unwrap();
        table.merge(&custom);

        let memory = table.get("Memory");
        assert_eq!(memory.iter().filter(|a| a.as_str() == "ram").count(), 1);
        assert_eq!(memory.last().map(|s| s.as_str()), Some("sodimm"));
        assert_eq!(table.get("Camera"), &["cam".to_string()]);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(AliasTable::from_json("[1, 2]"), Err(Error::Json(_))));
    }

    #[test]
    fn test_blank_category_rejected() {
        let err = AliasTable::from_json(r#"{"LCD": ["oled"], "  ": ["cam"]}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("空のカテゴリ名"));
    }
}
