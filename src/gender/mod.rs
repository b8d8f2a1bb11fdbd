//! 名字性别识别
//!
//! 根据男女两份参考名单判断名字的性别，容忍拼写差异、重音和多词名字。
//!
//! ## 处理流程
//! 1. 取第一个名字（空白分隔）
//! 2. NFC 合成 + 大写 + 去变音符号
//! 3. 名单精确匹配（快速路径）
//! 4. n-gram 模糊匹配 + 平分裁决（兜底）
//! 5. 汇总男女人数并计算比例

mod diacritics;
mod engine;
mod exact;
mod fuzzy;
mod ratio;
mod tokenizer;
mod types;

pub use diacritics::{normalize, DiacriticTable};
pub use engine::{classify, Classifier};
pub use exact::contains_exact;
pub use fuzzy::{
    classify as fuzzy_classify, decide, similarity, FuzzyIndex, FuzzyMatcher, FuzzyOptions,
};
pub use ratio::{ratio, RatioError, Tally};
pub use tokenizer::first_token;
pub use types::{Classification, DiacriticRule, MatchResult, RatioResult};
