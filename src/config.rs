use crate::dataset::DuplicatePolicy;
use crate::error::{ConfigLensError, Result};
use crate::extract::anchor::{DEFAULT_HEADER_TOKEN, DEFAULT_SCAN_COLUMNS, DEFAULT_SCAN_ROWS};
use crate::worksheet::xlsx::DEFAULT_SHEET_FILTER;
use config_lens_common::category::{default_categories, default_model_bearing};
use config_lens_common::AliasTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 表示幅の既定値（文字数）
pub const DEFAULT_BUDGET: usize = 80;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub header_token: String,
    pub scan_rows: usize,
    pub scan_columns: usize,
    /// 構成シート名に含まれるキーワード
    pub sheet_filter: String,
    /// カテゴリ（表示優先順）
    pub categories: Vec<String>,
    /// 型番を含むカテゴリ
    pub model_bearing: Vec<String>,
    pub blank_row_tolerance: usize,
    pub duplicate_policy: DuplicatePolicy,
    pub default_budget: usize,
    /// 追加エイリアスJSON
    pub alias_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込む（無ければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "設定を読み込み");
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigLensError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("config-lens").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            header_token: DEFAULT_HEADER_TOKEN.into(),
            scan_rows: DEFAULT_SCAN_ROWS,
            scan_columns: DEFAULT_SCAN_COLUMNS,
            sheet_filter: DEFAULT_SHEET_FILTER.into(),
            categories: default_categories(),
            model_bearing: default_model_bearing(),
            blank_row_tolerance: 0,
            duplicate_policy: DuplicatePolicy::LastWins,
            default_budget: DEFAULT_BUDGET,
            alias_file: None,
        }
    }

    /// 組み込みエイリアス + 設定ファイル指定 + 追加指定の順にマージ
    pub fn alias_table(&self, extra: Option<&Path>) -> Result<AliasTable> {
        let mut table = AliasTable::builtin();
        for path in self.alias_file.as_deref().into_iter().chain(extra) {
            let custom = AliasTable::from_file(path)?;
            tracing::debug!(path = %path.display(), categories = custom.len(), "エイリアスを追加");
            table.merge(&custom);
        }
        Ok(table)
    }
}
