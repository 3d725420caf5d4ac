//! Entity encoding of markup-significant characters.
//!
//! Wraps the `html-escape` crate's quoted-attribute encoder so that encoded
//! values are safe both as element text and inside a single- or double-quoted
//! attribute value.
//!
//! | Character | Reference |
//! |-----------|-----------|
//! | `&` | `&amp;` |
//! | `<` | `&lt;` |
//! | `>` | `&gt;` |
//! | `"` | `&quot;` |
//! | `'` | `&#x27;` |

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'` into character references.
///
/// All other characters pass through unchanged. Returns `Cow::Borrowed`
/// when there is nothing to escape.
///
/// Encoding is deliberately not idempotent: encoding `&lt;` again yields
/// `&amp;lt;`.
///
/// ## Examples
///
/// ```rust
/// use biscuit_html::encode;
///
/// assert_eq!(encode("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
/// assert_eq!(encode("plain text"), "plain text");
/// ```
#[inline]
pub fn encode(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_angle_brackets() {
        assert_eq!(
            encode("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escapes_ampersand_and_double_quote() {
        assert_eq!(encode(r#"a & "b""#), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn test_escapes_single_quote() {
        let result = encode("it's");
        assert!(!result.contains('\''));
        assert!(result.starts_with("it&"));
        assert!(result.ends_with(";s"));
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(encode("hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(encode("café \u{1F4A9} $ /"), "café \u{1F4A9} $ /");
    }

    #[test]
    fn test_encoding_twice_double_escapes() {
        let once = encode("<").into_owned();
        assert_eq!(once, "&lt;");
        assert_eq!(encode(&once), "&amp;lt;");
    }
}
