//! Structural template construction.
//!
//! [`Template`] owns its fragments and substitutions and can only grow by a
//! (substitution, fragment) pair, so it always holds exactly one more fragment
//! than it has slots. The [`html!`](crate::html) macro builds one inline.
//!
//! ## Examples
//!
//! ```rust
//! use biscuit_html::{Template, SlotMode};
//!
//! let template = Template::new("<ul>$")
//!     .push(vec!["<li>a</li>", "<li>b</li>"], "</ul><p>")
//!     .push("Tom & Jerry", "</p>");
//!
//! assert_eq!(
//!     template.slot_modes().collect::<Vec<_>>(),
//!     [SlotMode::Raw, SlotMode::Escaped]
//! );
//! assert_eq!(
//!     template.render(),
//!     "<ul><li>a</li><li>b</li></ul><p>Tom &amp; Jerry</p>"
//! );
//! ```

use std::fmt;

use crate::render::{SlotMode, render};
use crate::substitution::Substitution;

/// Fragments and substitutions kept in the `N + 1` / `N` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    fragments: Vec<String>,
    substitutions: Vec<Substitution>,
}

impl Template {
    /// Starts a template with its leading fragment and no slots.
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            fragments: vec![first.into()],
            substitutions: Vec::new(),
        }
    }

    /// Appends a slot and the fragment that follows it.
    pub fn push(mut self, substitution: impl Into<Substitution>, fragment: impl Into<String>) -> Self {
        self.substitutions.push(substitution.into());
        self.fragments.push(fragment.into());
        self
    }

    /// The literal fragments, always one more than [`substitutions`](Self::substitutions).
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    /// The mode of each slot, in order.
    pub fn slot_modes(&self) -> impl Iterator<Item = SlotMode> {
        self.fragments[..self.substitutions.len()]
            .iter()
            .map(|fragment| SlotMode::detect(fragment).0)
    }

    /// Renders into HTML-safe text.
    pub fn render(&self) -> String {
        render(&self.fragments, &self.substitutions)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Template> for Substitution {
    /// Nests a rendered template as a scalar value.
    ///
    /// In an escaped slot this encodes the markup a second time; use a raw
    /// slot to embed it as-is.
    fn from(template: Template) -> Self {
        Substitution::Scalar(template.render())
    }
}

/// Renders an HTML-safe string from alternating fragments and substitutions.
///
/// The first and every other argument after it are fragments (anything
/// `Into<String>`); the arguments in between are substitutions (anything
/// `Into<Substitution>`). End a fragment with `$` to insert the next value
/// without entity encoding.
///
/// ## Examples
///
/// ```rust
/// use biscuit_html::html;
///
/// let user = "<admin>";
/// let items = vec!["<li>one</li>", "<li>two</li>"];
///
/// assert_eq!(html!["<b>", user, "</b>"], "<b>&lt;admin&gt;</b>");
/// assert_eq!(html!["<ul>$", items, "</ul>"], "<ul><li>one</li><li>two</li></ul>");
/// assert_eq!(html!["static"], "static");
/// ```
#[macro_export]
macro_rules! html {
    [$first:expr $(, $substitution:expr, $fragment:expr)* $(,)?] => {
        $crate::Template::new($first)
            $(.push($substitution, $fragment))*
            .render()
    };
}
