/// Copy at most `capacity - 1` bytes of `src`.
///
/// The last byte of every fixed record is reserved, so a capacity of 32 holds
/// 31 bytes of text. Excess input is dropped without any signal. A cut that
/// would land inside a multi-byte character moves back to the previous char
/// boundary, which keeps the result valid UTF-8 and never longer than the
/// limit.
pub fn copy_truncating(capacity: usize, src: &str) -> String {
    if capacity == 0 || src.is_empty() {
        return String::new();
    }

    let limit = capacity - 1;
    if src.len() <= limit {
        return src.to_string();
    }

    let mut end = limit;
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    src[..end].to_string()
}

/// Append `text` to `content` as a new line.
///
/// Returns `false` and leaves `content` untouched when the line plus its
/// separator and the reserved byte would reach `capacity`. A separator is only
/// written when `content` already holds something.
pub fn append_line(content: &mut String, capacity: usize, text: &str) -> bool {
    let current_len = content.len();
    if current_len + text.len() + 2 >= capacity {
        return false;
    }

    if current_len > 0 {
        content.push('\n');
    }

    let remaining = capacity - content.len();
    content.push_str(&copy_truncating(remaining, text));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_keeps_short_input_intact() {
        assert_eq!(copy_truncating(32, "todo"), "todo");
        assert_eq!(copy_truncating(5, "abcd"), "abcd");
    }

    #[test]
    fn copy_reserves_last_byte() {
        assert_eq!(copy_truncating(5, "abcde"), "abcd");
        assert_eq!(copy_truncating(1, "abc"), "");
    }

    #[test]
    fn copy_of_empty_or_zero_capacity_is_empty() {
        assert_eq!(copy_truncating(0, "abc"), "");
        assert_eq!(copy_truncating(10, ""), "");
    }

    #[test]
    fn copy_never_exceeds_limit_for_any_capacity() {
        let src = "the quick brown fox jumps over the lazy dog";
        for capacity in 0..=src.len() + 2 {
            let out = copy_truncating(capacity, src);
            assert!(out.len() <= capacity.saturating_sub(1));
            if src.len() < capacity {
                assert_eq!(out, src);
            }
        }
    }

    #[test]
    fn copy_backs_off_to_char_boundary() {
        // "é" is two bytes; a limit of 2 would split it.
        assert_eq!(copy_truncating(3, "aé"), "a");
        assert_eq!(copy_truncating(4, "aé"), "aé");
    }

    #[test]
    fn append_to_empty_content_has_no_separator() {
        let mut content = String::new();
        assert!(append_line(&mut content, 1024, "buy milk"));
        assert_eq!(content, "buy milk");
    }

    #[test]
    fn append_joins_with_newline() {
        let mut content = "buy milk".to_string();
        assert!(append_line(&mut content, 1024, "call mom"));
        assert_eq!(content, "buy milk\ncall mom");
    }

    #[test]
    fn append_refuses_when_ceiling_reached() {
        let mut content = "x".repeat(1020);
        let before = content.clone();
        // 1020 + 3 + 2 = 1025 >= 1024
        assert!(!append_line(&mut content, 1024, "xyz"));
        assert_eq!(content, before);
    }

    #[test]
    fn append_boundary_matches_length_rule() {
        // L + N + 2 < capacity succeeds, equality fails.
        let mut content = "a".repeat(10);
        assert!(!append_line(&mut content, 15, "abc"));
        assert_eq!(content.len(), 10);
        assert!(append_line(&mut content, 16, "abc"));
        assert_eq!(content, format!("{}\nabc", "a".repeat(10)));
    }

    #[test]
    fn append_of_empty_line_adds_separator_only() {
        let mut content = "first".to_string();
        assert!(append_line(&mut content, 1024, ""));
        assert_eq!(content, "first\n");
    }
}
