//! 性别识别主引擎
//!
//! 组合分词、去变音、精确匹配（快速路径）、模糊匹配（兜底）

use std::sync::OnceLock;

use crate::gender::diacritics::DiacriticTable;
use crate::gender::exact::{comparison_key, contains_exact};
use crate::gender::fuzzy::{FuzzyMatcher, FuzzyOptions};
use crate::gender::ratio::Tally;
use crate::gender::tokenizer::first_token;
use crate::gender::types::Classification;

/// 性别识别器（可复用，可跨线程共享）
///
/// 模糊索引在第一次需要模糊匹配时才构建，之后复用
pub struct Classifier<'t> {
    table: &'t DiacriticTable,
    male_names: Vec<String>,
    female_names: Vec<String>,
    options: FuzzyOptions,
    fuzzy_matcher: OnceLock<FuzzyMatcher<'t>>,
}

impl<'t> Classifier<'t> {
    /// 创建识别器
    ///
    /// # Arguments
    /// * `table` - 变音符号表
    /// * `male_names` / `female_names` - 参考名单
    pub fn new(
        table: &'t DiacriticTable,
        male_names: Vec<String>,
        female_names: Vec<String>,
    ) -> Self {
        Self::with_options(table, male_names, female_names, FuzzyOptions::default())
    }

    pub fn with_options(
        table: &'t DiacriticTable,
        male_names: Vec<String>,
        female_names: Vec<String>,
        options: FuzzyOptions,
    ) -> Self {
        if male_names.is_empty() || female_names.is_empty() {
            tracing::warn!(
                "参考名单为空: male={}, female={}",
                male_names.len(),
                female_names.len()
            );
        }

        Self {
            table,
            male_names,
            female_names,
            options,
            fuzzy_matcher: OnceLock::new(),
        }
    }

    /// 模糊索引是否已构建
    pub fn fuzzy_index_built(&self) -> bool {
        self.fuzzy_matcher.get().is_some()
    }

    fn fuzzy_matcher(&self) -> &FuzzyMatcher<'t> {
        self.fuzzy_matcher.get_or_init(|| {
            FuzzyMatcher::new(
                self.table,
                &self.male_names,
                &self.female_names,
                self.options.clone(),
            )
        })
    }

    /// 识别全名的性别
    ///
    /// 只看第一个名字；两个名单都精确命中时交给模糊匹配裁决
    pub fn classify(&self, full_name: &str) -> Classification {
        let token = first_token(full_name);
        if token.is_empty() {
            return Classification::Unknown;
        }

        let normalized = comparison_key(self.table, token);

        let in_male = contains_exact(self.table, &normalized, &self.male_names);
        let in_female = contains_exact(self.table, &normalized, &self.female_names);

        match (in_male, in_female) {
            (true, false) => {
                tracing::debug!("精确匹配 {:?} -> male", token);
                Classification::Male
            }
            (false, true) => {
                tracing::debug!("精确匹配 {:?} -> female", token);
                Classification::Female
            }
            (true, true) => {
                tracing::debug!("{:?} 同时在两个名单中，交给模糊匹配", token);
                self.fuzzy_matcher().classify(token)
            }
            (false, false) => self.fuzzy_matcher().classify(token),
        }
    }

    /// 批量识别
    pub fn classify_all<I, S>(&self, names: I) -> Tally
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally = Tally::new();
        for name in names {
            let name = name.as_ref();
            tally.push(name, self.classify(name));
        }

        tracing::info!(
            "识别完成: male={}, female={}, unknown={}",
            tally.male.len(),
            tally.female.len(),
            tally.unknown.len()
        );
        tally
    }
}

/// 一次性识别（内置变音符号表，默认参数）
pub fn classify(
    full_name: &str,
    male_names: &[String],
    female_names: &[String],
) -> Classification {
    Classifier::new(
        DiacriticTable::builtin(),
        male_names.to_vec(),
        female_names.to_vec(),
    )
    .classify(full_name)
}
