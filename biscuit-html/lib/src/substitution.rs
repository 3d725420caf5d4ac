//! Values inserted into substitution slots.
//!
//! A slot receives either a single value or an ordered sequence of values.
//! Sequences are emitted item by item with no separator, each item escaped on
//! its own.
//!
//! ## Examples
//!
//! ```rust
//! use biscuit_html::Substitution;
//!
//! let single: Substitution = "Leandro".into();
//! assert_eq!(single.items().count(), 1);
//!
//! let many: Substitution = vec!["<li>a</li>", "<li>b</li>"].into();
//! assert_eq!(many.items().collect::<Vec<_>>(), ["<li>a</li>", "<li>b</li>"]);
//!
//! let number: Substitution = 42.into();
//! assert_eq!(number, Substitution::Scalar("42".to_string()));
//! ```

use std::borrow::Cow;
use std::fmt::{self, Display, Write};

use crate::error::RenderError;

/// The value for one substitution slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Substitution {
    /// A single stringified value.
    Scalar(String),
    /// An ordered sequence of stringified values, concatenated on output.
    Sequence(Vec<String>),
}

impl Substitution {
    /// Stringifies any `Display` value into a scalar.
    pub fn scalar(value: impl Display) -> Self {
        Substitution::Scalar(value.to_string())
    }

    /// Stringifies every item of an iterator into a sequence.
    pub fn sequence<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        Substitution::Sequence(values.into_iter().map(|v| v.to_string()).collect())
    }

    /// Stringifies a value, reporting a failing `Display` impl instead of panicking.
    ///
    /// ## Errors
    ///
    /// Returns `RenderError::Conversion` if the value's `Display` impl
    /// returns an error.
    pub fn try_scalar(value: impl Display) -> Result<Self, RenderError> {
        let mut text = String::new();
        write!(text, "{value}")?;
        Ok(Substitution::Scalar(text))
    }

    /// Iterates the items in emission order; a scalar yields exactly one.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            Substitution::Scalar(value) => std::slice::from_ref(value),
            Substitution::Sequence(values) => values,
        };
        items.iter().map(String::as_str)
    }

    /// Total byte length of all items, used to size the output buffer.
    pub(crate) fn len_hint(&self) -> usize {
        self.items().map(str::len).sum()
    }
}

impl Default for Substitution {
    fn default() -> Self {
        Substitution::Sequence(Vec::new())
    }
}

impl Display for Substitution {
    /// Writes the unescaped items back to back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items() {
            f.write_str(item)?;
        }
        Ok(())
    }
}

impl From<&str> for Substitution {
    fn from(value: &str) -> Self {
        Substitution::Scalar(value.to_string())
    }
}

impl From<&String> for Substitution {
    fn from(value: &String) -> Self {
        Substitution::Scalar(value.clone())
    }
}

impl From<String> for Substitution {
    fn from(value: String) -> Self {
        Substitution::Scalar(value)
    }
}

impl From<Cow<'_, str>> for Substitution {
    fn from(value: Cow<'_, str>) -> Self {
        Substitution::Scalar(value.into_owned())
    }
}

impl<T: ToString> From<Vec<T>> for Substitution {
    fn from(values: Vec<T>) -> Self {
        Substitution::Sequence(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for Substitution {
    fn from(values: &[T]) -> Self {
        Substitution::Sequence(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for Substitution {
    fn from(values: [T; N]) -> Self {
        Substitution::Sequence(values.iter().map(ToString::to_string).collect())
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Substitution {
                fn from(value: $ty) -> Self {
                    Substitution::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(
    char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

#[cfg(feature = "json")]
impl From<serde_json::Value> for Substitution {
    /// Arrays become sequences; everything else is a scalar.
    ///
    /// `null` stringifies as `"null"` and strings are taken without quotes.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => {
                Substitution::Sequence(items.iter().map(json_item_to_string).collect())
            }
            other => Substitution::Scalar(json_item_to_string(&other)),
        }
    }
}

/// Stringifies a JSON value the way a template literal would.
#[cfg(feature = "json")]
fn json_item_to_string(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // Nested arrays flatten with commas; null entries become empty
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => json_item_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
