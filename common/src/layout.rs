//! 2列表示レイアウトモジュール
//!
//! 選択済みの部品を左右2列に振り分ける。左列が多い（または同数）。

use crate::types::MatchedComponent;
use serde::Serialize;

/// 左右2列の表示グリッド
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayGrid<T = MatchedComponent> {
    pub left: Vec<T>,
    pub right: Vec<T>,
}

impl<T> DisplayGrid<T> {
    /// 表示行数（左列の長さ）
    pub fn row_count(&self) -> usize {
        self.left.len().max(self.right.len())
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// 行ごとの (左, 右) ペア
    pub fn rows(&self) -> impl Iterator<Item = (Option<&T>, Option<&T>)> {
        (0..self.row_count()).map(move |i| (self.left.get(i), self.right.get(i)))
    }

    /// 左列 → 右列の順で走査
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.left.iter().chain(self.right.iter())
    }

    /// 各セルを変換
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DisplayGrid<U> {
        DisplayGrid {
            left: self.left.into_iter().map(&mut f).collect(),
            right: self.right.into_iter().map(&mut f).collect(),
        }
    }
}

/// 左に ceil(N/2) 件、右に残りを順序を保って振り分ける
pub fn split<T>(mut items: Vec<T>) -> DisplayGrid<T> {
    let left_count = items.len().div_ceil(2);
    let right = items.split_off(left_count);
    DisplayGrid { left: items, right }
}
