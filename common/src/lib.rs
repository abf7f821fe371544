//! Config Lens Common Library
//!
//! ワークシート抽出後の構成データ型と、表示向けの選択・整形ロジック。
//! I/Oを持たない純粋な関数のみ。

pub mod types;
pub mod category;
pub mod alias;
pub mod matcher;
pub mod layout;
pub mod formatter;
pub mod error;

pub use types::{CategoryComponents, ComponentRecord, IdentifierRecord, MatchedComponent};
pub use category::{DEFAULT_CATEGORIES, MODEL_BEARING_CATEGORIES};
pub use alias::AliasTable;
pub use matcher::select;
pub use layout::{split, DisplayGrid};
pub use formatter::{fit, normalize, FitStrategy, FittedText, SpecFormatter};
pub use error::{Error, Result};
