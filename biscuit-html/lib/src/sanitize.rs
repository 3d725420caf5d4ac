//! Removal of characters that are not allowed in XML/HTML documents.
//!
//! The allowed set is the XML 1.0 `Char` production:
//!
//! ```text
//! #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
//! ```
//!
//! A Rust `&str` can never hold a surrogate code point, so [`sanitize`] only
//! has control characters and the `U+FFFE`/`U+FFFF` non-characters to drop.
//! Text that arrives as UTF-16 goes through [`sanitize_utf16`], which also
//! drops unpaired surrogates.
//!
//! ## Examples
//!
//! ```rust
//! use biscuit_html::sanitize;
//!
//! assert_eq!(sanitize("|\u{8}|"), "||");
//! assert_eq!(sanitize("tab\tstays"), "tab\tstays");
//! ```

use std::borrow::Cow;

/// Returns `true` if `c` may appear in an XML/HTML document.
#[inline]
pub fn is_valid_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Removes every character rejected by [`is_valid_char`].
///
/// Returns `Cow::Borrowed` when the text is already clean, which is the
/// common case for template fragments.
///
/// ## Examples
///
/// ```rust
/// use std::borrow::Cow;
/// use biscuit_html::sanitize;
///
/// assert!(matches!(sanitize("<p>clean</p>"), Cow::Borrowed(_)));
/// assert_eq!(sanitize("a\u{0}b\u{FFFF}c"), "abc");
/// ```
pub fn sanitize(text: &str) -> Cow<'_, str> {
    match text.find(|c: char| !is_valid_char(c)) {
        None => Cow::Borrowed(text),
        Some(first_invalid) => {
            let mut clean = String::with_capacity(text.len());
            clean.push_str(&text[..first_invalid]);
            clean.extend(text[first_invalid..].chars().filter(|c| is_valid_char(*c)));
            Cow::Owned(clean)
        }
    }
}

/// Decodes UTF-16 text, dropping unpaired surrogates and invalid characters.
///
/// ## Examples
///
/// ```rust
/// use biscuit_html::sanitize_utf16;
///
/// // 0xD800 is a lone high surrogate; 0x0008 is backspace
/// let units = [0x7C, 0xD800, 0x0008, 0x7C];
/// assert_eq!(sanitize_utf16(&units), "||");
/// ```
pub fn sanitize_utf16(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .filter_map(Result::ok)
        .filter(|c| is_valid_char(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_backspace() {
        assert_eq!(sanitize("|\u{8}|"), "||");
    }

    #[test]
    fn test_keeps_tab_newline_carriage_return() {
        let text = "a\tb\nc\rd";
        let result = sanitize(text);
        assert_eq!(result, text);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_removes_all_other_c0_controls() {
        let controls: String = (0u32..0x20)
            .filter_map(char::from_u32)
            .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
            .collect();
        assert_eq!(sanitize(&controls), "");
    }

    #[test]
    fn test_removes_noncharacters_fffe_ffff() {
        assert_eq!(sanitize("x\u{FFFE}y\u{FFFF}z"), "xyz");
    }

    #[test]
    fn test_keeps_astral_plane() {
        let text = "|\u{1F4A9}|";
        assert!(matches!(sanitize(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_keeps_delete_and_c1_controls() {
        // DEL and C1 controls are legal XML 1.0 characters
        let text = "\u{7F}\u{85}\u{9F}";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_clean_prefix_is_preserved() {
        assert_eq!(sanitize("<p>héllo\u{1}</p>"), "<p>héllo</p>");
    }

    #[test]
    fn test_empty_string() {
        assert!(matches!(sanitize(""), Cow::Borrowed("")));
    }

    #[test]
    fn test_utf16_drops_unpaired_surrogates() {
        let units = [0x61, 0xDC00, 0x62, 0xD83D, 0x63];
        assert_eq!(sanitize_utf16(&units), "abc");
    }

    #[test]
    fn test_utf16_keeps_surrogate_pairs() {
        let units: Vec<u16> = "|\u{1F4A9}|".encode_utf16().collect();
        assert_eq!(sanitize_utf16(&units), "|\u{1F4A9}|");
    }

    #[test]
    fn test_utf16_filters_controls() {
        let units: Vec<u16> = "a\u{8}b".encode_utf16().collect();
        assert_eq!(sanitize_utf16(&units), "ab");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: sanitizing twice is the same as sanitizing once
        #[test]
        fn sanitize_is_idempotent(s in any::<String>()) {
            let once = sanitize(&s).into_owned();
            let twice = sanitize(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        /// Property: the output never contains a rejected character
        #[test]
        fn sanitize_output_is_valid(s in any::<String>()) {
            prop_assert!(sanitize(&s).chars().all(is_valid_char));
        }

        /// Property: UTF-16 sanitizing agrees with str sanitizing on valid input
        #[test]
        fn utf16_matches_str(s in any::<String>()) {
            let units: Vec<u16> = s.encode_utf16().collect();
            prop_assert_eq!(sanitize_utf16(&units), sanitize(&s).into_owned());
        }
    }
}
