//! Shared utility functions

/// Number of characters (Unicode scalar values) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `count` characters of `s`, sliced on a UTF-8 boundary.
///
/// If `count` is at least the character length, returns `s` unchanged.
/// Used by the typewriter so partial placeholders never split a multi-byte
/// character.
pub fn char_prefix(s: &str, count: usize) -> &str {
    match s.char_indices().nth(count) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate `s` to at most `max_width` display columns, appending `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if unicode_width::UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_shorter_than_text() {
        assert_eq!(char_prefix("hello world", 5), "hello");
    }

    #[test]
    fn test_prefix_past_end_returns_whole() {
        assert_eq!(char_prefix("hello", 10), "hello");
        assert_eq!(char_prefix("hello", 5), "hello");
    }

    #[test]
    fn test_prefix_respects_utf8() {
        // Each character is 3 bytes
        let s = "日本語";
        assert_eq!(char_prefix(s, 1), "日");
        assert_eq!(char_prefix(s, 2), "日本");
        assert_eq!(char_len(s), 3);
    }

    #[test]
    fn test_prefix_zero() {
        assert_eq!(char_prefix("hello", 0), "");
        assert_eq!(char_prefix("", 3), "");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("report.pdf", 20), "report.pdf");
        assert_eq!(truncate_to_width("a-very-long-file-name.ldt", 10), "a-very-lo…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
