//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Used for log previews of generated text. Byte length is compared against
/// `max_len`, but the cut always lands on a character boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Whether generated text carries no usable content.
///
/// Empty strings, whitespace, and strings made only of punctuation
/// (`...`, `.`, `…`, `?!`) are degenerate.
pub fn is_degenerate(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || c.is_ascii_punctuation() || c == '…')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "é" is two bytes; max_len=6 -> target=3 -> boundary at 2
        assert_eq!(truncate("ééééé", 6), "é...");
        assert_eq!(truncate("ééé", 6), "ééé");
    }

    #[test]
    fn test_degenerate_outputs() {
        assert!(is_degenerate(""));
        assert!(is_degenerate("   \n"));
        assert!(is_degenerate("..."));
        assert!(is_degenerate(" . "));
        assert!(is_degenerate("…"));
        assert!(is_degenerate("?!"));
    }

    #[test]
    fn test_real_text_is_not_degenerate() {
        assert!(!is_degenerate("lol what?"));
        assert!(!is_degenerate("Sus."));
        assert!(!is_degenerate("ok"));
    }
}
