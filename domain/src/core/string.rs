//! String utilities for the domain layer.

/// Shorten text for log output, appending `...` when characters were cut.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn test_preview_truncates_ascii() {
        assert_eq!(preview("hello world", 5), "hello...");
    }

    #[test]
    fn test_preview_multibyte() {
        assert_eq!(preview("日本語テスト", 3), "日本語...");
        assert_eq!(preview("👋🌍🎉", 2), "👋🌍...");
    }

    #[test]
    fn test_preview_empty() {
        assert_eq!(preview("", 10), "");
    }
}
