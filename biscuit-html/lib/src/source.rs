//! Template text with `${name}` placeholders.
//!
//! Lets templates live in files or arguments instead of code. The syntax is
//! that of a template literal:
//!
//! - `${name}` is an escaped slot
//! - `$${name}` is a fragment ending in `$` followed by a slot, so the slot is raw
//! - any other `$` is literal text
//!
//! Placeholder names are trimmed and may contain ASCII letters, digits, `_`,
//! `.` and `-`.
//!
//! ## Examples
//!
//! ```rust
//! use biscuit_html::{TemplateSource, Values, Substitution};
//!
//! let source = TemplateSource::parse("<p>${name}</p><ul>$${items}</ul>").unwrap();
//! assert_eq!(source.names(), ["name", "items"]);
//!
//! let mut values = Values::new();
//! values.insert("name".into(), "<Tom>".into());
//! values.insert("items".into(), vec!["<li>a</li>"].into());
//!
//! assert_eq!(
//!     source.render(&values).unwrap(),
//!     "<p>&lt;Tom&gt;</p><ul><li>a</li></ul>"
//! );
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::RenderError;
use crate::render::{SlotMode, render};
use crate::substitution::Substitution;

/// Named values for [`TemplateSource::render`].
pub type Values = BTreeMap<String, Substitution>;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Parsed template text: fragments plus the placeholder name of each slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    fragments: Vec<String>,
    placeholders: Vec<String>,
}

impl TemplateSource {
    /// Splits template text into fragments and placeholder names.
    ///
    /// ## Errors
    ///
    /// - `RenderError::UnterminatedPlaceholder` if a `${` has no closing `}`
    /// - `RenderError::InvalidPlaceholder` if a name is empty or has illegal characters
    pub fn parse(text: &str) -> Result<Self, RenderError> {
        let mut fragments = Vec::new();
        let mut placeholders = Vec::new();
        let mut current = String::new();
        let mut rest = text;
        let mut consumed = 0;

        while let Some(start) = rest.find(OPEN) {
            let offset = consumed + start;
            current.push_str(&rest[..start]);

            let after_open = &rest[start + OPEN.len()..];
            let end = after_open
                .find(CLOSE)
                .ok_or(RenderError::UnterminatedPlaceholder { offset })?;

            let raw_name = &after_open[..end];
            let name = raw_name.trim();
            if !is_valid_name(name) {
                return Err(RenderError::InvalidPlaceholder {
                    name: raw_name.to_string(),
                    offset,
                });
            }

            fragments.push(std::mem::take(&mut current));
            placeholders.push(name.to_string());

            let advance = start + OPEN.len() + end + CLOSE.len_utf8();
            consumed += advance;
            rest = &rest[advance..];
        }

        current.push_str(rest);
        fragments.push(current);

        debug!(slots = placeholders.len(), "parsed template source");
        Ok(Self {
            fragments,
            placeholders,
        })
    }

    /// The literal fragments, one more than there are placeholders.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Placeholder names in slot order, including repeats.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.placeholders.len());
        for name in &self.placeholders {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    /// The mode of each slot, in order.
    pub fn slot_modes(&self) -> impl Iterator<Item = SlotMode> {
        self.fragments[..self.placeholders.len()]
            .iter()
            .map(|fragment| SlotMode::detect(fragment).0)
    }

    /// Renders with a value for every placeholder.
    ///
    /// A name used in several slots receives the same value in each; extra
    /// entries in `values` are ignored.
    ///
    /// ## Errors
    ///
    /// Returns `RenderError::MissingValue` for the first placeholder that has
    /// no entry in `values`.
    pub fn render(&self, values: &Values) -> Result<String, RenderError> {
        let substitutions = self
            .placeholders
            .iter()
            .map(|name| {
                values
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RenderError::MissingValue(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(render(&self.fragments, &substitutions))
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, Substitution)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_no_placeholders() {
        let source = TemplateSource::parse("<p>plain</p>").unwrap();
        assert_eq!(source.fragments(), ["<p>plain</p>"]);
        assert!(source.placeholders().is_empty());
        assert_eq!(source.render(&Values::new()).unwrap(), "<p>plain</p>");
    }

    #[test]
    fn test_single_placeholder() {
        let source = TemplateSource::parse("<p>${name}</p>").unwrap();
        assert_eq!(source.fragments(), ["<p>", "</p>"]);
        assert_eq!(source.placeholders(), ["name"]);
    }

    #[test]
    fn test_raw_placeholder_keeps_marker_in_fragment() {
        let source = TemplateSource::parse("<p>$${html}</p>").unwrap();
        assert_eq!(source.fragments(), ["<p>$", "</p>"]);
        assert_eq!(source.slot_modes().collect::<Vec<_>>(), [SlotMode::Raw]);
    }

    #[test]
    fn test_lone_dollar_is_literal() {
        let source = TemplateSource::parse("costs $5 ${x}").unwrap();
        assert_eq!(source.fragments(), ["costs $5 ", ""]);
    }

    #[test]
    fn test_names_are_trimmed() {
        let source = TemplateSource::parse("${ user.name }").unwrap();
        assert_eq!(source.placeholders(), ["user.name"]);
    }

    #[test]
    fn test_unterminated_placeholder() {
        let err = TemplateSource::parse("ab${name").unwrap_err();
        assert!(matches!(err, RenderError::UnterminatedPlaceholder { offset: 2 }));
    }

    #[test]
    fn test_empty_placeholder() {
        let err = TemplateSource::parse("x${  }").unwrap_err();
        assert!(matches!(err, RenderError::InvalidPlaceholder { offset: 1, .. }));
    }

    #[test]
    fn test_illegal_name_characters() {
        let err = TemplateSource::parse("<p>${a b}</p>").unwrap_err();
        match err {
            RenderError::InvalidPlaceholder { name, offset } => {
                assert_eq!(name, "a b");
                assert_eq!(offset, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_offset_counts_from_start_of_text() {
        let err = TemplateSource::parse("${a}é${").unwrap_err();
        assert!(matches!(err, RenderError::UnterminatedPlaceholder { offset: 6 }));
    }

    #[test]
    fn test_names_deduplicated_in_order() {
        let source = TemplateSource::parse("${b}${a}${b}").unwrap();
        assert_eq!(source.placeholders(), ["b", "a", "b"]);
        assert_eq!(source.names(), ["b", "a"]);
    }

    #[test]
    fn test_render_escaped_and_raw() {
        let source = TemplateSource::parse("<p>${x}</p>$${x}").unwrap();
        let out = source.render(&values(&[("x", "<b>".into())])).unwrap();
        assert_eq!(out, "<p>&lt;b&gt;</p><b>");
    }

    #[test]
    fn test_render_missing_value() {
        let source = TemplateSource::parse("${present}${absent}").unwrap();
        let err = source
            .render(&values(&[("present", "ok".into())]))
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingValue(ref name) if name == "absent"));
    }

    #[test]
    fn test_render_sanitizes_fragments() {
        let source = TemplateSource::parse("|\u{8}|${x}").unwrap();
        let out = source.render(&values(&[("x", "\u{8}".into())])).unwrap();
        assert_eq!(out, "||");
    }

    #[test]
    fn test_render_ignores_extra_values() {
        let source = TemplateSource::parse("${a}").unwrap();
        let out = source
            .render(&values(&[("a", "1".into()), ("b", "2".into())]))
            .unwrap();
        assert_eq!(out, "1");
    }
}
