//! FieldExplainer - Clipboard content helpers
//!
//! Filtering and preview text for changed clipboard content

/// Default maximum length (characters) of content worth presenting
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 1000;

/// Preview length before truncation kicks in
const PREVIEW_LIMIT: usize = 50;
/// Characters kept when truncating
const PREVIEW_KEEP: usize = 47;

/// Whether changed content should be presented to the user
pub fn is_presentable(content: &str, max_len: usize) -> bool {
    !content.is_empty() && content.chars().count() <= max_len
}

/// Short single-line form for logs and tooltips
pub fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_LIMIT {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(PREVIEW_KEEP).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_oversized() {
        assert!(!is_presentable("", DEFAULT_MAX_CONTENT_LENGTH));
        assert!(is_presentable("field_name", DEFAULT_MAX_CONTENT_LENGTH));

        let at_limit = "a".repeat(DEFAULT_MAX_CONTENT_LENGTH);
        let over_limit = "a".repeat(DEFAULT_MAX_CONTENT_LENGTH + 1);
        assert!(is_presentable(&at_limit, DEFAULT_MAX_CONTENT_LENGTH));
        assert!(!is_presentable(&over_limit, DEFAULT_MAX_CONTENT_LENGTH));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let text = "字段".repeat(400);
        assert_eq!(text.chars().count(), 800);
        assert!(is_presentable(&text, DEFAULT_MAX_CONTENT_LENGTH));
    }

    #[test]
    fn preview_keeps_short_text() {
        let text = "x".repeat(50);
        assert_eq!(preview(&text), text);
    }

    #[test]
    fn preview_truncates_long_text() {
        let text = "y".repeat(51);
        let result = preview(&text);
        assert_eq!(result, format!("{}...", "y".repeat(47)));
        assert_eq!(result.chars().count(), 50);
    }
}
