#![forbid(unsafe_code)]

//! Normalization helpers shared by field validation and the submission guard.
//!
//! Interactive validation strips whitespace only, so a pasted
//! `"+370 612 34567"` still matches the country pattern. The submission
//! guard is stricter and reduces the raw value to bare digits before
//! checking prefix membership.

/// Remove all whitespace from `value`.
#[must_use]
pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Reduce `value` to its ASCII digits, dropping `+`, separators, and
/// anything else.
#[must_use]
pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Strip a single leading `+`, if present.
#[must_use]
pub fn strip_plus(value: &str) -> &str {
    value.strip_prefix('+').unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_whitespace_spaces_and_tabs() {
        assert_eq!(strip_whitespace("+370 612\t34567"), "+37061234567");
        assert_eq!(strip_whitespace("  "), "");
        assert_eq!(strip_whitespace("0712345678"), "0712345678");
    }

    #[test]
    fn strip_whitespace_unicode_spaces() {
        assert_eq!(strip_whitespace("+370\u{a0}612"), "+370612");
    }

    #[test]
    fn strip_non_digits_drops_plus_and_separators() {
        assert_eq!(strip_non_digits("+370 612-34-567"), "37061234567");
        assert_eq!(strip_non_digits("(07) 12.34.56.78"), "0712345678");
        assert_eq!(strip_non_digits("no digits"), "");
    }

    #[test]
    fn strip_non_digits_ignores_non_ascii_digits() {
        // Eastern Arabic numerals are not accepted by checkout backends.
        assert_eq!(strip_non_digits("٠٧١٢"), "");
    }

    #[test]
    fn strip_plus_only_leading() {
        assert_eq!(strip_plus("+370"), "370");
        assert_eq!(strip_plus("370"), "370");
        assert_eq!(strip_plus("3+70"), "3+70");
        assert_eq!(strip_plus(""), "");
    }
}
