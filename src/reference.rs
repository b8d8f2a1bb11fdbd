// 参考名单工具函数
//
// 名单文件格式：
// - 纯文本：每行一个名字，空行和 # 开头的注释行忽略
// - JSON：字符串数组（按 .json 扩展名识别）

use std::path::Path;

use anyhow::Result;

/// 标准化名字（去除首尾空格）
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

/// 解析纯文本名单
///
/// 大小写保持原样，比较时才规范化；重复项保留
pub fn parse_plain(content: &str) -> Vec<String> {
    content
        .lines()
        .map(normalize_name)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// 解析 JSON 字符串数组名单
pub fn parse_json(content: &str) -> Result<Vec<String>> {
    let names: Vec<String> = serde_json::from_str(content)?;
    Ok(names
        .iter()
        .map(|n| normalize_name(n))
        .filter(|n| !n.is_empty())
        .collect())
}

/// 从文件加载名单
pub fn load_names(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("读取名单失败 {:?}: {}", path, e))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let names = if is_json {
        parse_json(&content)?
    } else {
        parse_plain(&content)
    };

    if names.is_empty() {
        tracing::warn!("名单为空: {:?}", path);
    } else {
        tracing::info!("加载名单 {:?}: {} 个名字", path, names.len());
    }

    Ok(names)
}
