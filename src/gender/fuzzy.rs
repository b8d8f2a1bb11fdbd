//! 名字模糊匹配
//!
//! n-gram 倒排索引召回候选，Dice 系数 + Damerau-Levenshtein 打分

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strsim::normalized_damerau_levenshtein;

use crate::gender::diacritics::DiacriticTable;
use crate::gender::exact::comparison_key;
use crate::gender::types::{Classification, MatchResult};

/// 补齐首尾的占位符，让首尾字母也能形成 n-gram（不会出现在名字里）
const PAD: char = '\0';

/// 模糊匹配参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyOptions {
    /// 最小 n-gram 长度（默认 2）
    #[serde(default = "default_gram_min")]
    pub gram_min: usize,
    /// 最大 n-gram 长度（默认 3）
    #[serde(default = "default_gram_max")]
    pub gram_max: usize,
    /// 低于该分数的匹配按 0 处理（默认 0，不过滤）
    #[serde(default)]
    pub min_score: f64,
}

fn default_gram_min() -> usize {
    2
}

fn default_gram_max() -> usize {
    3
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            gram_min: default_gram_min(),
            gram_max: default_gram_max(),
            min_score: 0.0,
        }
    }
}

impl FuzzyOptions {
    /// 修正非法的 gram 区间（0 或 min > max）
    fn gram_range(&self) -> (usize, usize) {
        let lower = self.gram_min.max(1);
        let upper = self.gram_max.max(lower);
        (lower, upper)
    }
}

type GramCounts = HashMap<String, usize>;

/// 索引中的一个名字
struct IndexedName {
    name: String,
    key: String,
    grams: GramCounts,
}

/// 单个名单的模糊索引（构建后只读）
pub struct FuzzyIndex<'t> {
    table: &'t DiacriticTable,
    options: FuzzyOptions,
    entries: Vec<IndexedName>,
    /// gram → 名单下标
    postings: HashMap<String, Vec<usize>>,
}

impl<'t> FuzzyIndex<'t> {
    /// 为名单构建索引
    pub fn build(table: &'t DiacriticTable, names: &[String], options: FuzzyOptions) -> Self {
        let (lower, upper) = options.gram_range();
        let mut entries = Vec::with_capacity(names.len());
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();

        for name in names {
            let key = fuzzy_key(table, name);
            let grams = gram_counts(&key, lower, upper);
            let idx = entries.len();
            for gram in grams.keys() {
                postings.entry(gram.clone()).or_default().push(idx);
            }
            entries.push(IndexedName {
                name: name.clone(),
                key,
                grams,
            });
        }

        tracing::debug!(
            "模糊索引构建完成: {} 个名字, {} 个 gram",
            entries.len(),
            postings.len()
        );

        Self {
            table,
            options,
            entries,
            postings,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 名单中与 `name` 最相似的名字
    ///
    /// 同分时取名单中靠前的；空名单或无共同 gram 返回 0 分
    pub fn best_match(&self, name: &str) -> MatchResult {
        if self.entries.is_empty() {
            return MatchResult::none();
        }

        let (lower, upper) = self.options.gram_range();
        let key = fuzzy_key(self.table, name);
        let grams = gram_counts(&key, lower, upper);

        // 只对至少共享一个 gram 的名字打分
        let mut candidates: Vec<usize> = grams
            .keys()
            .filter_map(|gram| self.postings.get(gram))
            .flatten()
            .copied()
            .collect::<HashSet<usize>>()
            .into_iter()
            .collect();
        candidates.sort_unstable();

        let mut best: Option<(usize, f64)> = None;
        for idx in candidates {
            let entry = &self.entries[idx];
            let score = score_keys(&key, &grams, &entry.key, &entry.grams);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }

        match best {
            Some((idx, score)) if score > 0.0 && score >= self.options.min_score => MatchResult {
                candidate: self.entries[idx].name.clone(),
                score,
            },
            _ => MatchResult::none(),
        }
    }
}

/// 模糊比较键，与精确匹配相同（NFC + 大写 + 去变音），标点和空白原样保留
pub fn fuzzy_key(table: &DiacriticTable, name: &str) -> String {
    comparison_key(table, name)
}

/// 两个名字的相似度 (0.0 - 1.0)
///
/// 对称；规范化后相同才为 1.0（空串除外，空名字不匹配任何名字）；
/// 没有共同 n-gram 为 0.0
pub fn similarity(table: &DiacriticTable, a: &str, b: &str, options: &FuzzyOptions) -> f64 {
    let (lower, upper) = options.gram_range();
    let key_a = fuzzy_key(table, a);
    let key_b = fuzzy_key(table, b);
    let grams_a = gram_counts(&key_a, lower, upper);
    let grams_b = gram_counts(&key_b, lower, upper);
    score_keys(&key_a, &grams_a, &key_b, &grams_b)
}

fn score_keys(key_a: &str, grams_a: &GramCounts, key_b: &str, grams_b: &GramCounts) -> f64 {
    if key_a.is_empty() || key_b.is_empty() {
        return 0.0;
    }
    if key_a == key_b {
        return 1.0;
    }

    let dice = dice_coefficient(grams_a, grams_b);
    if dice == 0.0 {
        return 0.0;
    }

    // 不同的键编辑相似度 < 1，结果严格小于 1
    (dice + normalized_damerau_levenshtein(key_a, key_b)) / 2.0
}

/// 补齐后的 n-gram 多重集
fn gram_counts(key: &str, lower: usize, upper: usize) -> GramCounts {
    let mut counts = GramCounts::new();
    if key.is_empty() {
        return counts;
    }

    let padded: Vec<char> = std::iter::once(PAD)
        .chain(key.chars())
        .chain(std::iter::once(PAD))
        .collect();

    for size in lower..=upper {
        if padded.len() < size {
            break;
        }
        for window in padded.windows(size) {
            *counts.entry(window.iter().collect()).or_insert(0) += 1;
        }
    }

    counts
}

/// Dice 系数：2·|A∩B| / (|A|+|B|)
fn dice_coefficient(a: &GramCounts, b: &GramCounts) -> f64 {
    let total: usize = a.values().sum::<usize>() + b.values().sum::<usize>();
    if total == 0 {
        return 0.0;
    }

    let shared: usize = a
        .iter()
        .map(|(gram, count)| b.get(gram).map_or(0, |other| (*count).min(*other)))
        .sum();

    (2 * shared) as f64 / total as f64
}

/// 按两边最高分裁决
///
/// 分数更高且大于 0 的一方胜出，同分或都为 0 时无法判断
pub fn decide(male: &MatchResult, female: &MatchResult) -> Classification {
    if male.score > female.score && male.score > 0.0 {
        Classification::Male
    } else if female.score > male.score && female.score > 0.0 {
        Classification::Female
    } else {
        Classification::Unknown
    }
}

/// 模糊匹配器：男女名单各一个索引
pub struct FuzzyMatcher<'t> {
    male: FuzzyIndex<'t>,
    female: FuzzyIndex<'t>,
}

impl<'t> FuzzyMatcher<'t> {
    pub fn new(
        table: &'t DiacriticTable,
        male_names: &[String],
        female_names: &[String],
        options: FuzzyOptions,
    ) -> Self {
        Self {
            male: FuzzyIndex::build(table, male_names, options.clone()),
            female: FuzzyIndex::build(table, female_names, options),
        }
    }

    /// 两个名单各自的最佳匹配（男, 女）
    pub fn best_matches(&self, name: &str) -> (MatchResult, MatchResult) {
        (self.male.best_match(name), self.female.best_match(name))
    }

    pub fn classify(&self, name: &str) -> Classification {
        let (male, female) = self.best_matches(name);
        let result = decide(&male, &female);
        tracing::debug!(
            "模糊匹配 {:?}: male={:?}({:.3}) female={:?}({:.3}) -> {}",
            name,
            male.candidate,
            male.score,
            female.candidate,
            female.score,
            result
        );
        result
    }
}

/// 一次性模糊分类（每次调用都重建索引，批量场景请复用 `FuzzyMatcher`）
pub fn classify(
    table: &DiacriticTable,
    name: &str,
    male_names: &[String],
    female_names: &[String],
) -> Classification {
    FuzzyMatcher::new(table, male_names, female_names, FuzzyOptions::default()).classify(name)
}
