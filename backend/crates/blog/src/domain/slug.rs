//! Slug Derivation
//!
//! スラッグはタイトルから導出される:
//! 小文字化 → 英数字とスペース・ハイフン以外を除去 → 空白をハイフンに。

/// Derive a URL slug from a post title
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
