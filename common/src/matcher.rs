//! 表示用部品選択モジュール
//!
//! 優先順のカテゴリごとに、部品名がキーワード・同義語で**始まる**ものを選ぶ。
//! カタログ構築（部分一致）より厳しい条件で、同じ部品を二重に表示しない。

use crate::alias::AliasTable;
use crate::types::{IdentifierRecord, MatchedComponent};
use std::collections::HashSet;

/// カテゴリの前方一致候補を作る
///
/// - キーワード自体（小文字）
/// - 空白・`/`・`-` を除いたキーワード
/// - 空白を含む場合は最初の単語
/// - 同義語（小文字）
pub fn prefix_variants(keyword: &str, aliases: &[String]) -> Vec<String> {
    let lower = keyword.trim().to_lowercase();
    let mut variants: Vec<String> = Vec::new();

    let mut add = |candidate: String| {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    };

    add(lower.clone());
    add(lower
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/' && *c != '-')
        .collect());
    if lower.contains(' ') {
        if let Some(first) = lower.split_whitespace().next() {
            add(first.to_string());
        }
    }
    for alias in aliases {
        add(alias.trim().to_lowercase());
    }

    variants
}

/// 識別子の構成から表示対象の部品を優先順で選ぶ
///
/// 先に並ぶカテゴリが部品を獲得し、後のカテゴリには出てこない。
/// 該当なしのカテゴリは結果に含めない。
pub fn select<S: AsRef<str>>(
    record: &IdentifierRecord,
    priority: &[S],
    aliases: &AliasTable,
) -> Vec<MatchedComponent> {
    let mut claimed: HashSet<(String, String)> = HashSet::new();
    let mut selected = Vec::new();

    for category in priority {
        let category = category.as_ref();
        let variants = prefix_variants(category, aliases.get(category));
        let before = selected.len();

        for (_, component) in record.iter_components() {
            let key = component.identity_key();
            if claimed.contains(&key) {
                continue;
            }

            let name = component.name.to_lowercase();
            if variants.iter().any(|v| name.starts_with(v.as_str())) {
                tracing::trace!(component = %component.name, category, "部品を選択");
                claimed.insert(key);
                selected.push(MatchedComponent::from_record(category, component));
            }
        }

        if selected.len() == before {
            tracing::debug!(category, "前方一致する部品なし");
        }
    }

    selected
}
