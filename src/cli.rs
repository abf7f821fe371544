use crate::dataset::DuplicatePolicy;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `--budget` の下限（省略記号 + 1文字）
const MIN_CLI_BUDGET: u64 = 4;

#[derive(Parser)]
#[command(name = "config-lens")]
#[command(about = "構成表ワークシートの抽出・表示ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時は ~/.config/config-lens/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 識別子重複時の扱い (last-wins/first-wins/reject)
    #[arg(long, global = true)]
    pub policy: Option<DuplicatePolicy>,

    /// 部品一覧の途中で許容する連続空行数
    #[arg(long, global = true)]
    pub blank_rows: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 構成シートの一覧
    Sheets {
        /// Excelファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 識別子（System P/N）の一覧
    Ids {
        /// Excelファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 対象シート（省略時は全構成シート）
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// 識別子の構成を2列で表示
    Show {
        /// Excelファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 対象シート（省略時は全構成シート）
        #[arg(short, long)]
        sheet: Option<String>,

        /// 識別子（省略時は選択）
        #[arg(short, long)]
        id: Option<String>,

        /// 仕様欄の文字数（4以上）
        #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(MIN_CLI_BUDGET..))]
        budget: Option<usize>,

        /// 切り詰めずに全文を表示
        #[arg(long)]
        full: bool,

        /// カスタムエイリアスファイル（JSON）
        #[arg(long)]
        alias: Option<PathBuf>,
    },

    /// 抽出結果をJSONで出力
    Export {
        /// Excelファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 対象シート（省略時は全構成シート）
        #[arg(short, long)]
        sheet: Option<String>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定値で設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}
