//! HTML-safe string templating.
//!
//! Templates are literal fragments interleaved with substitution slots. Every
//! piece of output is stripped of characters that are not allowed in XML/HTML
//! documents, and substituted values are additionally entity-encoded unless the
//! slot opts out with a trailing `$` on the preceding fragment.
//!
//! ## Modules
//!
//! - [`render()`] - The renderer over raw fragment/substitution slices
//! - [`sanitize()`] - Removal of characters invalid in the markup character set
//! - [`encode()`] - Entity encoding of markup-significant characters
//! - [`Template`] / [`html!`] - Structural builders that keep fragments and slots paired
//! - [`TemplateSource`] - Parser for `${name}` placeholders in template text
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `json` | Yes | `serde_json::Value` conversions into [`Substitution`] |
//!
//! ## Examples
//!
//! ```rust
//! use biscuit_html::html;
//!
//! let name = "<script>alert(1)</script>";
//! assert_eq!(
//!     html!["<p>", name, "</p>"],
//!     "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
//! );
//!
//! // A trailing `$` marks the next slot as trusted markup
//! let trusted = "<span>ok</span>";
//! assert_eq!(html!["<p>$", trusted, "</p>"], "<p><span>ok</span></p>");
//! ```

pub mod encode;
pub mod error;
pub mod render;
pub mod sanitize;
pub mod source;
pub mod substitution;
pub mod template;

pub use encode::encode;
pub use error::RenderError;
pub use render::{RAW_MARKER, SlotMode, render};
pub use sanitize::{is_valid_char, sanitize, sanitize_utf16};
pub use source::{TemplateSource, Values};
pub use substitution::Substitution;
pub use template::Template;
