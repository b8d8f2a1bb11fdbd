//! 精确匹配
//!
//! 名单很短，比较时逐条大写 + 去变音，不做预计算

use unicode_normalization::UnicodeNormalization;

use crate::gender::diacritics::DiacriticTable;

/// 名字转为比较键：NFC 合成、大写、去除变音符号
///
/// 先合成，"e\u{301}" → "é"，否则查不到变音符号表
pub fn comparison_key(table: &DiacriticTable, name: &str) -> String {
    let composed: String = name.nfc().collect();
    table.normalize(&composed.to_uppercase())
}

/// 名单中是否存在规范化后完全相同的名字
///
/// 空名单视为“无数据”，返回 false
pub fn contains_exact(table: &DiacriticTable, name: &str, list: &[String]) -> bool {
    if list.is_empty() {
        return false;
    }

    let key = comparison_key(table, name);
    list.iter().any(|entry| comparison_key(table, entry) == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_case_and_accents() {
        let table = DiacriticTable::builtin();
        let list = names(&["Jean", "Pierre", "Héloïse"]);

        assert!(contains_exact(table, "JEAN", &list));
        assert!(contains_exact(table, "jéan", &list));
        assert!(contains_exact(table, "HELOISE", &list));
        assert!(!contains_exact(table, "Jeanne", &list));
    }

    #[test]
    fn test_exact_match_empty_list() {
        let table = DiacriticTable::builtin();
        assert!(!contains_exact(table, "Jean", &[]));
    }

    #[test]
    fn test_exact_match_decomposed_entries() {
        let table = DiacriticTable::builtin();
        // 名单条目本身是分解形式
        let list = names(&["Je\u{301}an", "Zoe\u{308}"]);

        assert!(contains_exact(table, "Jean", &list));
        assert!(contains_exact(table, "Jéan", &list));
        assert!(contains_exact(table, "ZOË", &list));
    }

    #[test]
    fn test_comparison_key() {
        let table = DiacriticTable::builtin();
        assert_eq!(comparison_key(table, "Zoë"), "ZOE");
        assert_eq!(comparison_key(table, "straße"), "STRASSE");
        assert_eq!(comparison_key(table, "Ma\u{301}rie-Anne"), "MARIE-ANNE");
    }
}
