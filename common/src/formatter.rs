//! 仕様テキスト整形モジュール
//!
//! セル幅（文字数）に収まるよう仕様文字列を正規化・切り詰める。
//!
//! ## 切り詰め方針
//! 1. 型番カテゴリ: 型番トークンとその直前の文脈を優先して残す
//! 2. その他: 予算内で最後の区切り文字で切る
//! 3. どちらも使えなければ先頭から機械的に切る
//!
//! 長さはすべて文字数で数える。

use crate::category::MODEL_BEARING_CATEGORIES;
use regex::Regex;
use serde::Serialize;

/// 省略記号
pub const ELLIPSIS: &str = "...";

/// 型番の直前に残す文脈の最大文字数
const PREFIX_CONTEXT_CHARS: usize = 30;

/// 型番の後ろに続ける文脈の最小文字数
const MIN_TRAILING_CONTEXT: usize = 10;

/// 区切り文字（ここで切ると読みやすい）
const DELIMITERS: &[char] = &[',', ';', '/', '-', '+', '(', ')', '[', ']'];

lazy_static::lazy_static! {
    /// 型番パターン（優先順）
    static ref MODEL_PATTERNS: Vec<Regex> = vec![
        // 英数字-英数字（例: MT40A1G8SA-062E）
        Regex::new(r"[A-Z0-9]+-[A-Z0-9]+").unwrap(),
        // 英字1-4 + 数字3-6 + 英数字（例: RTX3050, SN740）
        Regex::new(r"[A-Z]{1,4}[0-9]{3,6}[A-Z0-9]*").unwrap(),
        // 数字3-4 + 英字1-2（例: 1185G, 512GB）
        Regex::new(r"[0-9]{3,4}[A-Z]{1,2}").unwrap(),
    ];

    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// 切り詰めに使った方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitStrategy {
    /// 予算内なのでそのまま
    Untruncated,
    /// 型番トークン優先
    ModelToken,
    /// 区切り文字位置で切る
    Delimiter,
    /// 先頭から機械的に切る（型番が見つからない場合のフォールバック含む）
    HardCut,
}

/// 整形結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FittedText {
    /// セルに表示する文字列
    pub display: String,
    /// 正規化済みの全文（ツールチップ用）
    pub full: String,
    pub strategy: FitStrategy,
}

impl FittedText {
    pub fn is_truncated(&self) -> bool {
        self.strategy != FitStrategy::Untruncated
    }
}

/// 空白（改行含む）の連続を1つの空白にまとめ、前後を除去
pub fn normalize(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// 仕様テキスト整形器
#[derive(Debug, Clone)]
pub struct SpecFormatter {
    model_bearing: Vec<String>,
}

impl Default for SpecFormatter {
    fn default() -> Self {
        Self::new(MODEL_BEARING_CATEGORIES.iter().copied())
    }
}

impl SpecFormatter {
    pub fn new<I, S>(model_bearing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            model_bearing: model_bearing.into_iter().map(Into::into).collect(),
        }
    }

    /// 型番カテゴリか（大文字小文字無視）
    pub fn is_model_bearing(&self, category: &str) -> bool {
        self.model_bearing
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category.trim()))
    }

    /// 予算（文字数）に収まるよう整形
    pub fn fit(&self, text: &str, category: &str, budget: usize) -> FittedText {
        let full = normalize(text);

        if char_len(&full) <= budget {
            return FittedText {
                display: full.clone(),
                full,
                strategy: FitStrategy::Untruncated,
            };
        }

        // 省略記号すら入らない予算
        if budget < ELLIPSIS.len() {
            return FittedText {
                display: take_chars(&full, budget).trim_end().to_string(),
                full,
                strategy: FitStrategy::HardCut,
            };
        }

        let (display, strategy) = if self.is_model_bearing(category) {
            match fit_model_token(&full, budget) {
                Some(display) => (display, FitStrategy::ModelToken),
                None => {
                    tracing::debug!(category, "型番パターンなし、先頭から切り詰め");
                    (hard_cut(&full, budget), FitStrategy::HardCut)
                }
            }
        } else {
            match fit_at_delimiter(&full, budget) {
                Some(display) => (display, FitStrategy::Delimiter),
                None => (hard_cut(&full, budget), FitStrategy::HardCut),
            }
        };

        FittedText {
            display,
            full,
            strategy,
        }
    }
}

/// 既定の型番カテゴリで整形
pub fn fit(text: &str, category: &str, budget: usize) -> FittedText {
    SpecFormatter::default().fit(text, category, budget)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn take_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

/// 末尾n文字
fn last_chars(text: &str, n: usize) -> String {
    let skip = char_len(text).saturating_sub(n);
    text.chars().skip(skip).collect()
}

fn hard_cut(full: &str, budget: usize) -> String {
    format!("{}{}", take_chars(full, budget.saturating_sub(ELLIPSIS.len())), ELLIPSIS)
}

/// 型番トークン優先の切り詰め（パターンに一致しなければNone）
fn fit_model_token(full: &str, budget: usize) -> Option<String> {
    let found = MODEL_PATTERNS.iter().find_map(|re| re.find(full))?;
    let limit = budget.saturating_sub(ELLIPSIS.len());

    let context = last_chars(&full[..found.start()], PREFIX_CONTEXT_CHARS);
    let context = context.trim();
    let priority = if context.is_empty() {
        found.as_str().to_string()
    } else {
        format!("{} {}", context, found.as_str())
    };

    let priority_len = char_len(&priority);
    if priority_len > limit {
        return Some(format!("{}{}", take_chars(&priority, limit), ELLIPSIS));
    }

    let remaining = limit - priority_len;
    if remaining > MIN_TRAILING_CONTEXT {
        // 区切りの空白1文字分を差し引く
        let trailing = take_chars(&full[found.end()..], remaining - 1);
        let trailing = trailing.trim();
        if !trailing.is_empty() {
            return Some(format!("{} {}{}", priority, trailing, ELLIPSIS));
        }
    }

    Some(format!("{}{}", priority, ELLIPSIS))
}

/// 区切り文字位置での切り詰め（適切な位置が無ければNone）
fn fit_at_delimiter(full: &str, budget: usize) -> Option<String> {
    let limit = budget.saturating_sub(ELLIPSIS.len());
    let cut = full
        .chars()
        .enumerate()
        .take_while(|(i, _)| *i < limit)
        .filter(|(_, c)| DELIMITERS.contains(c))
        .map(|(i, _)| i)
        .last()?;

    if cut > budget / 2 {
        Some(format!("{}{}", take_chars(full, cut + 1), ELLIPSIS))
    } else {
        None
    }
}
