// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::gender::FuzzyOptions;

const APP_DIR_NAME: &str = "GenderRatio";
const DEFAULT_MALE_LIST: &str = "male.txt";
const DEFAULT_FEMALE_LIST: &str = "female.txt";

// ============================================================================
// 应用配置
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 男性名单路径（None = 配置目录下的 male.txt）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub male_list: Option<PathBuf>,
    /// 女性名单路径（None = 配置目录下的 female.txt）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_list: Option<PathBuf>,
    /// 自定义变音符号表（None = 内置表）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diacritics: Option<PathBuf>,
    /// 模糊匹配参数
    #[serde(default)]
    pub matcher: FuzzyOptions,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        let app_dir = config_dir.join(APP_DIR_NAME);
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.json"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        tracing::info!("尝试从以下路径加载配置: {:?}", path);

        if !path.exists() {
            tracing::warn!("配置文件不存在，使用默认配置");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("配置文件格式错误 {:?}: {}", path, e))?;

        if config.matcher.gram_min == 0 || config.matcher.gram_min > config.matcher.gram_max {
            tracing::warn!(
                "gram 区间非法 ({}..={})，将自动修正",
                config.matcher.gram_min,
                config.matcher.gram_max
            );
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to_path(&path)
    }

    /// 原子写入：先写临时文件，再重命名覆盖
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tracing::info!("保存配置到: {:?}", path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("写入临时文件失败: {}", e);
            e
        })?;

        if let Err(e) = std::fs::rename(&temp_path, path) {
            tracing::error!("替换配置文件失败: {}", e);
            if let Err(cleanup_err) = std::fs::remove_file(&temp_path) {
                tracing::warn!("清理临时文件失败: {}", cleanup_err);
            }
            return Err(e.into());
        }

        Ok(())
    }

    /// 名单路径：未配置时放在 `base_dir` 下
    pub fn resolve_lists(&self, base_dir: &Path) -> (PathBuf, PathBuf) {
        let male = self
            .male_list
            .clone()
            .unwrap_or_else(|| base_dir.join(DEFAULT_MALE_LIST));
        let female = self
            .female_list
            .clone()
            .unwrap_or_else(|| base_dir.join(DEFAULT_FEMALE_LIST));
        (male, female)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_should_return_default_when_missing() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let config = AppConfig::load_from_path(&temp.path().join("config.json")).expect("load");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.matcher.gram_min, 2);
        assert_eq!(config.matcher.gram_max, 3);
    }

    #[test]
    fn load_should_fill_missing_fields() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{"male_list": "/data/m.txt", "matcher": {"min_score": 0.3}}"#)
            .expect("write config");

        let config = AppConfig::load_from_path(&path).expect("load");
        assert_eq!(config.male_list, Some(PathBuf::from("/data/m.txt")));
        assert_eq!(config.female_list, None);
        assert_eq!(config.matcher.min_score, 0.3);
        assert_eq!(config.matcher.gram_min, 2);
    }

    #[test]
    fn load_should_reject_malformed_json() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write config");
        assert!(AppConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn save_then_load_should_keep_values() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("nested").join("config.json");
        let config = AppConfig {
            female_list: Some(PathBuf::from("f.json")),
            matcher: FuzzyOptions {
                gram_min: 1,
                gram_max: 4,
                min_score: 0.5,
            },
            ..AppConfig::default()
        };

        config.save_to_path(&path).expect("save");
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(AppConfig::load_from_path(&path).expect("load"), config);
    }

    #[test]
    fn resolve_lists_should_fallback_to_base_dir() {
        let config = AppConfig {
            male_list: Some(PathBuf::from("/lists/boys.txt")),
            ..AppConfig::default()
        };
        let (male, female) = config.resolve_lists(Path::new("/cfg"));
        assert_eq!(male, PathBuf::from("/lists/boys.txt"));
        assert_eq!(female, PathBuf::from("/cfg/female.txt"));
    }
}
