//! The template renderer.
//!
//! Walks fragments and substitution slots once, left to right. Each slot is
//! either [`SlotMode::Escaped`] (default) or [`SlotMode::Raw`], decided by
//! whether the fragment right before it ends with [`RAW_MARKER`].
//!
//! ## Escaping Policy
//!
//! | Piece | Sanitized | Entity-encoded |
//! |-------|-----------|----------------|
//! | Literal fragment | Yes | No |
//! | Item in an escaped slot | Yes | Yes |
//! | Item in a raw slot | Yes | No |
//!
//! ## Known Limitation
//!
//! A fragment that legitimately ends in `$` always turns the next slot raw.
//! There is no escape for the marker itself; emit the `$` from a substitution
//! instead, since only literal fragment text is inspected.
//!
//! ## Examples
//!
//! ```rust
//! use biscuit_html::{render, Substitution};
//!
//! let out = render(&["<p>", "</p>"], &[Substitution::from("<b>")]);
//! assert_eq!(out, "<p>&lt;b&gt;</p>");
//!
//! let out = render(&["<p>$", "</p>"], &[Substitution::from("<b>")]);
//! assert_eq!(out, "<p><b></p>");
//! ```

use tracing::{debug, trace, warn};

use crate::encode::encode;
use crate::sanitize::sanitize;
use crate::substitution::Substitution;

/// The character that, ending a fragment, marks the next slot as raw.
pub const RAW_MARKER: char = '$';

/// How the items of one substitution slot are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotMode {
    /// Sanitize, then entity-encode.
    #[default]
    Escaped,
    /// Sanitize only; the caller vouches for the markup.
    Raw,
}

impl SlotMode {
    /// Detects the mode for the slot following `fragment`.
    ///
    /// Returns the mode and the fragment text to emit, with exactly one
    /// trailing marker removed in the raw case.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use biscuit_html::SlotMode;
    ///
    /// assert_eq!(SlotMode::detect("<p>$"), (SlotMode::Raw, "<p>"));
    /// assert_eq!(SlotMode::detect("cost: $$"), (SlotMode::Raw, "cost: $"));
    /// assert_eq!(SlotMode::detect("<p>"), (SlotMode::Escaped, "<p>"));
    /// ```
    pub fn detect(fragment: &str) -> (SlotMode, &str) {
        match fragment.strip_suffix(RAW_MARKER) {
            Some(stripped) => (SlotMode::Raw, stripped),
            None => (SlotMode::Escaped, fragment),
        }
    }

    /// Writes one item in this mode.
    fn push_item(self, output: &mut String, item: &str) {
        let clean = sanitize(item);
        match self {
            SlotMode::Escaped => output.push_str(&encode(&clean)),
            SlotMode::Raw => output.push_str(&clean),
        }
    }
}

/// Renders fragments interleaved with substitutions into HTML-safe text.
///
/// `fragments` must hold exactly one more entry than `substitutions`; the
/// [`Template`](crate::Template) builder and the [`html!`](crate::html) macro
/// guarantee this. On a mismatch the output is still well defined: a slot
/// without a substitution emits nothing, surplus substitutions are ignored,
/// and an empty fragment list renders as `""`.
///
/// ## Examples
///
/// ```rust
/// use biscuit_html::{render, Substitution};
///
/// let items = Substitution::from(vec!["a", "<b>", "c"]);
/// assert_eq!(render(&["<p>", "</p>"], &[items]), "<p>a&lt;b&gt;c</p>");
///
/// // No slots: the lone fragment is only sanitized
/// assert_eq!(render(&["|\u{8}|"], &[]), "||");
/// ```
pub fn render<S: AsRef<str>>(fragments: &[S], substitutions: &[Substitution]) -> String {
    let Some((last, leading)) = fragments.split_last() else {
        if !substitutions.is_empty() {
            warn!(substitutions = substitutions.len(), "render called without fragments");
        }
        return String::new();
    };

    if leading.len() != substitutions.len() {
        warn!(
            fragments = fragments.len(),
            substitutions = substitutions.len(),
            "fragment count should be substitution count + 1"
        );
    }

    let capacity = fragments.iter().map(|f| f.as_ref().len()).sum::<usize>()
        + substitutions.iter().map(Substitution::len_hint).sum::<usize>();
    let mut output = String::with_capacity(capacity);

    for (index, fragment) in leading.iter().enumerate() {
        let (mode, text) = SlotMode::detect(fragment.as_ref());
        output.push_str(&sanitize(text));

        let Some(substitution) = substitutions.get(index) else {
            continue;
        };

        if mode == SlotMode::Raw {
            trace!(slot = index, items = substitution.items().count(), "raw slot");
        }

        for item in substitution.items() {
            mode.push_item(&mut output, item);
        }
    }

    output.push_str(&sanitize(last.as_ref()));

    debug!(slots = leading.len(), output_len = output.len(), "rendered template");
    output
}
