//! 名字分词
//!
//! 只取全名中的第一个名字，中间名/复合名丢弃

/// 取第一个以空白分隔的词
///
/// 开头的空白会被跳过；空串或全空白返回空串
pub fn first_token(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("Jean Paul"), "Jean");
        assert_eq!(first_token("Marie"), "Marie");
        assert_eq!(first_token("Anne-Sophie Martin"), "Anne-Sophie");
    }

    #[test]
    fn test_first_token_empty() {
        assert_eq!(first_token(""), "");
        assert_eq!(first_token("   \t\n"), "");
    }

    #[test]
    fn test_first_token_leading_whitespace() {
        assert_eq!(first_token("  Zoë\tDupont"), "Zoë");
        // 全角空格也算空白
        assert_eq!(first_token("Hélène\u{3000}Durand"), "Hélène");
    }
}
