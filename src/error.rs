use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigLensError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ブック読み込みエラー: {0}")]
    Workbook(String),

    #[error("'{filter}' を含むワークシートがありません: {path}")]
    NoConfigSheets { path: String, filter: String },

    #[error("ワークシートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("System P/N 見出しが見つかりません: {0}")]
    AnchorNotFound(String),

    #[error("部品一覧が見つかりません: {0}")]
    EmptyCatalog(String),

    #[error("識別子が見つかりません: {0}")]
    UnknownIdentifier(String),

    #[error("処理がキャンセルされました")]
    Cancelled,

    #[error("ワーカー実行エラー: {0}")]
    Worker(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] config_lens_common::Error),
}

impl From<calamine::Error> for ConfigLensError {
    fn from(err: calamine::Error) -> Self {
        ConfigLensError::Workbook(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigLensError>;
