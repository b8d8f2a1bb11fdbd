//! 男女比例计算

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gender::types::{Classification, RatioResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    /// 男女人数都为 0，无法计算百分比
    #[error("没有识别出性别的名字，无法计算比例")]
    NoClassifiedNames,
}

/// 计算男女比例
///
/// 两个百分比各自四舍五入，和不一定是 100；人数按百分比折算到 `total_population`。
pub fn ratio(
    male_count: u64,
    female_count: u64,
    total_population: u64,
) -> Result<RatioResult, RatioError> {
    // u128 求和，两个 u64 相加不会溢出
    let classified = male_count as u128 + female_count as u128;
    if classified == 0 {
        return Err(RatioError::NoClassifiedNames);
    }

    let boy_percent = round(male_count as f64 / classified as f64 * 100.0);
    let girl_percent = round(female_count as f64 / classified as f64 * 100.0);

    Ok(RatioResult {
        boy_count: round(boy_percent as f64 / 100.0 * total_population as f64),
        girl_count: round(girl_percent as f64 / 100.0 * total_population as f64),
        boy_percent,
        girl_percent,
    })
}

/// 按识别结果分组的名字
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub male: Vec<String>,
    pub female: Vec<String>,
    pub unknown: Vec<String>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, classification: Classification) {
        let name = name.into();
        match classification {
            Classification::Male => self.male.push(name),
            Classification::Female => self.female.push(name),
            Classification::Unknown => self.unknown.push(name),
        }
    }

    /// 参与统计的总人数（含无法判断的）
    pub fn total(&self) -> usize {
        self.male.len() + self.female.len() + self.unknown.len()
    }

    /// 以男女人数计算比例，并折算到 `total_population`
    pub fn ratio(&self, total_population: u64) -> Result<RatioResult, RatioError> {
        ratio(
            self.male.len() as u64,
            self.female.len() as u64,
            total_population,
        )
    }
}

fn round(value: f64) -> u64 {
    value.round() as u64
}
