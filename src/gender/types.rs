//! 性别识别类型定义

use serde::{Deserialize, Serialize};

/// 识别结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Male,
    Female,
    /// 无法判断（空名字、两边得分相同或都为 0）
    Unknown,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Male => "male",
            Classification::Female => "female",
            Classification::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 变音符号规则：`letters` 中每个字符都映射为 `base`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiacriticRule {
    /// 基础字母（可打印 ASCII，连字可为多个字母，如 "AE"）
    pub base: String,
    /// 带变音符号的字符集合
    pub letters: String,
}

/// 模糊匹配结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 名单中得分最高的名字，无候选时为空
    pub candidate: String,
    /// 相似度 (0.0 - 1.0)，1.0 表示规范化后完全相同
    pub score: f64,
}

impl MatchResult {
    /// 无任何候选
    pub fn none() -> Self {
        Self {
            candidate: String::new(),
            score: 0.0,
        }
    }
}

/// 比例计算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioResult {
    /// 按总人数折算的男性人数
    pub boy_count: u64,
    /// 按总人数折算的女性人数
    pub girl_count: u64,
    /// 男性百分比（四舍五入）
    pub boy_percent: u64,
    /// 女性百分比（四舍五入）
    pub girl_percent: u64,
}
