use regex::Regex;

/// 由博客标题生成落盘文件名：小写、剔除非字母数字、空白转下划线。
/// 空结果兜底为"blog"。
pub fn safe_slug(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let strip = Regex::new(r"[^a-z0-9 _-]+").expect("invalid slug strip pattern");
    let spaces = Regex::new(r"\s+").expect("invalid slug space pattern");

    let stripped = strip.replace_all(&lowered, "");
    let slug = spaces
        .replace_all(&stripped, "_")
        .trim_matches('_')
        .to_string();

    if slug.is_empty() {
        "blog".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(safe_slug("Binary Search Trees"), "binary_search_trees");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(
            safe_slug("Rust's Async: What & Why?"),
            "rusts_async_what_why"
        );
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(safe_slug(""), "blog");
        assert_eq!(safe_slug("!!!"), "blog");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(safe_slug("  a   b  "), "a_b");
    }
}
