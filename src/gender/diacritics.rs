//! 变音符号表与规范化
//!
//! 把带重音/特殊字符替换为 ASCII 基础字母（é → e，Æ → AE）

use std::collections::HashMap;

use anyhow::Result;

use crate::gender::types::DiacriticRule;

/// 内置变音符号表（`[{"base": .., "letters": ..}]`）
const EMBEDDED_DIACRITICS: &str = include_str!("../../resources/diacritics.json");

/// 可打印 ASCII 上界，超过此码位的字符才需要查表
const ASCII_PRINTABLE_MAX: u32 = 0x7E;

lazy_static::lazy_static! {
    /// 进程级内置表，首次使用时初始化，之后只读
    static ref BUILTIN_TABLE: DiacriticTable = DiacriticTable::from_json(EMBEDDED_DIACRITICS)
        .unwrap_or_else(|err| {
            tracing::error!("内置变音符号表解析失败，回退空表: {}", err);
            DiacriticTable::default()
        });
}

/// 变音符号映射表（字符 → 基础字母），构建后不可变
#[derive(Debug, Clone, Default)]
pub struct DiacriticTable {
    map: HashMap<char, String>,
}

impl DiacriticTable {
    /// 由规则列表构建映射表
    ///
    /// 同一字符被多条规则声明时后者覆盖前者（记录 warn 日志）。
    /// 基础字母必须是非空的可打印 ASCII，否则整条规则被跳过，
    /// 保证 `normalize` 幂等。
    pub fn load(rules: &[DiacriticRule]) -> Self {
        let mut map: HashMap<char, String> = HashMap::new();

        for rule in rules {
            if !is_valid_base(&rule.base) {
                tracing::warn!("跳过非法的基础字母: {:?}", rule.base);
                continue;
            }

            for letter in rule.letters.chars() {
                // ASCII 字符不会被查表
                if (letter as u32) <= ASCII_PRINTABLE_MAX {
                    continue;
                }

                if let Some(previous) = map.insert(letter, rule.base.clone()) {
                    if previous != rule.base {
                        tracing::warn!(
                            "字符 {:?} 重复映射: {} -> {}（后者生效）",
                            letter,
                            previous,
                            rule.base
                        );
                    }
                }
            }
        }

        tracing::debug!("变音符号表加载完成，共 {} 个字符", map.len());
        Self { map }
    }

    /// 解析 JSON 格式的规则列表
    pub fn from_json(content: &str) -> Result<Self> {
        let rules: Vec<DiacriticRule> = serde_json::from_str(content)?;
        if rules.is_empty() {
            anyhow::bail!("变音符号表为空");
        }
        Ok(Self::load(&rules))
    }

    /// 从文件加载
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("读取变音符号表失败 {:?}: {}", path, e))?;
        Self::from_json(&content)
    }

    /// 内置表（进程内只初始化一次）
    pub fn builtin() -> &'static DiacriticTable {
        &BUILTIN_TABLE
    }

    /// 查找字符对应的基础字母
    pub fn lookup(&self, ch: char) -> Option<&str> {
        self.map.get(&ch).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// 去除变音符号
    ///
    /// 纯函数，不可失败；表中没有的字符原样保留
    pub fn normalize(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());

        for ch in text.chars() {
            if (ch as u32) > ASCII_PRINTABLE_MAX {
                if let Some(base) = self.lookup(ch) {
                    result.push_str(base);
                    continue;
                }
            }
            result.push(ch);
        }

        result
    }
}

/// 使用内置表去除变音符号
pub fn normalize(text: &str) -> String {
    DiacriticTable::builtin().normalize(text)
}

fn is_valid_base(base: &str) -> bool {
    !base.is_empty()
        && base
            .chars()
            .all(|c| (0x20..=ASCII_PRINTABLE_MAX).contains(&(c as u32)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(base: &str, letters: &str) -> DiacriticRule {
        DiacriticRule {
            base: base.to_string(),
            letters: letters.to_string(),
        }
    }

    #[test]
    fn test_builtin_table_loaded() {
        let table = DiacriticTable::builtin();
        assert!(!table.is_empty());
        assert_eq!(table.lookup('é'), Some("e"));
        assert_eq!(table.lookup('É'), Some("E"));
        assert_eq!(table.lookup('Æ'), Some("AE"));
        assert_eq!(table.lookup('ß'), Some("ss"));
    }

    #[test]
    fn test_normalize_accents() {
        assert_eq!(normalize("Jéan"), "Jean");
        assert_eq!(normalize("FRANÇOISE"), "FRANCOISE");
        assert_eq!(normalize("Łukasz Øyvind"), "Lukasz Oyvind");
        assert_eq!(normalize("Ægir"), "AEgir");
    }

    #[test]
    fn test_normalize_keeps_unknown_chars() {
        // 表中没有的字符原样保留
        assert_eq!(normalize("李雷"), "李雷");
        assert_eq!(normalize("Ωmega"), "Ωmega");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for input in ["Jéan-Loïc", "ÆØÅ æøå", "Dvořák", "李雷 Zoë", "ⓐⓑⓒ", "ｆｕｌｌ"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn test_load_expands_letters() {
        let table = DiacriticTable::load(&[rule("a", "àáâ"), rule("o", "öø")]);
        assert_eq!(table.len(), 5);
        assert_eq!(table.normalize("àöø"), "aoo");
    }

    #[test]
    fn test_load_duplicate_last_write_wins() {
        let table = DiacriticTable::load(&[rule("a", "à"), rule("e", "à")]);
        assert_eq!(table.lookup('à'), Some("e"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_skips_invalid_base() {
        // 非 ASCII 基础字母会破坏幂等性，整条规则跳过
        let table = DiacriticTable::load(&[rule("é", "è"), rule("", "ê"), rule("e", "ë")]);
        assert_eq!(table.lookup('è'), None);
        assert_eq!(table.lookup('ê'), None);
        assert_eq!(table.lookup('ë'), Some("e"));
    }

    #[test]
    fn test_load_ignores_ascii_letters() {
        let table = DiacriticTable::load(&[rule("A", "Aa\u{00C0}")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.normalize("a"), "a");
    }

    #[test]
    fn test_from_json() {
        let table = DiacriticTable::from_json(r#"[{"base": "c", "letters": "çć"}]"#)
            .expect("parse table");
        assert_eq!(table.normalize("ça"), "ca");

        assert!(DiacriticTable::from_json("not json").is_err());
        assert!(DiacriticTable::from_json("[]").is_err());
    }

    #[test]
    fn test_from_path() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("diacritics.json");
        std::fs::write(&path, r#"[{"base": "n", "letters": "ñ"}]"#).expect("write table");

        let table = DiacriticTable::from_path(&path).expect("load table");
        assert_eq!(table.normalize("niño"), "nino");
        assert!(DiacriticTable::from_path(&temp.path().join("missing.json")).is_err());
    }
}
