// ABOUTME: Small text helpers shared by the validator and previewer.
// ABOUTME: Character-based length, ellipsis truncation, and first-non-empty fallback selection.

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Length in Unicode scalar values.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncates `text` to at most `max_len` characters.
///
/// Text that fits is returned verbatim. Longer text keeps its first
/// `max_len - 3` characters followed by `...`. For caps smaller than the
/// ellipsis itself the text is simply cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    if char_len(text) <= max_len {
        return text.to_string();
    }
    let marker_len = ELLIPSIS.len();
    if max_len < marker_len {
        return text.chars().take(max_len).collect();
    }
    let mut out: String = text.chars().take(max_len - marker_len).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Returns the first non-empty candidate, or `default` when all are empty.
pub fn first_non_empty<S: AsRef<str>>(candidates: &[S], default: &str) -> String {
    for candidate in candidates {
        let candidate: &str = candidate.as_ref();
        if !candidate.is_empty() {
            return candidate.to_string();
        }
    }
    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(char_len(&truncate(&"a".repeat(100), 60)), 60);
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let text = "héllo wörld";
        assert_eq!(truncate(text, 11), text);
        assert_eq!(truncate(text, 7), "héll...");
    }

    #[test]
    fn truncate_with_tiny_cap() {
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(truncate("abcdef", 3), "...");
    }

    #[test]
    fn first_non_empty_respects_order() {
        assert_eq!(first_non_empty(&["", "b", "c"], "d"), "b");
        assert_eq!(first_non_empty(&["a", "b"], "d"), "a");
        assert_eq!(first_non_empty(&["", ""], "d"), "d");
        assert_eq!(first_non_empty::<&str>(&[], "d"), "d");
    }
}
