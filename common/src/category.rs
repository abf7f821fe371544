//! 部品カテゴリ定義
//!
//! カタログ分類・表示選択の両方で使う固定カテゴリ一覧。

/// 既定のカテゴリ（表示優先順）
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "CPU",
    "GPU",
    "Memory",
    "LCD",
    "WLAN",
    "WWAN",
    "SSD",
    "Battery",
    "Adaptor",
    "KeyBoard",
    "USH",
    "Finger Print",
    "Smart Card",
    "RFID",
    "FIPS",
];

/// 型番を含みやすいカテゴリ（型番優先の切り詰め対象）
pub const MODEL_BEARING_CATEGORIES: &[&str] = &["CPU", "GPU", "Memory", "LCD", "SSD", "WLAN"];

/// 既定カテゴリを所有文字列で取得
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

/// 既定の型番カテゴリを所有文字列で取得
pub fn default_model_bearing() -> Vec<String> {
    MODEL_BEARING_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

/// ラベルにキーワードが含まれるか（大文字小文字無視の部分一致）
///
/// カタログ構築用の緩い分類。表示側の前方一致より広く拾う。
pub fn label_mentions(label: &str, keyword: &str) -> bool {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return false;
    }
    label.to_lowercase().contains(&keyword.to_lowercase())
}
