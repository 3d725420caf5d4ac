//! Error types for template conversion and parsing.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while preparing values or parsing template text.
///
/// Rendering itself never fails; these surface while building a
/// [`Substitution`](crate::Substitution) or a [`TemplateSource`](crate::TemplateSource).
#[derive(Debug, Error)]
pub enum RenderError {
    /// A `Display` implementation reported an error while stringifying a value.
    #[error("failed to convert value to a string: {0}")]
    Conversion(#[from] fmt::Error),

    /// A `${` was opened but never closed.
    #[error("unterminated placeholder starting at byte {offset}")]
    UnterminatedPlaceholder { offset: usize },

    /// A placeholder name was empty or contained characters outside `[A-Za-z0-9_.-]`.
    #[error("invalid placeholder name '{name}' at byte {offset}")]
    InvalidPlaceholder { name: String, offset: usize },

    /// A placeholder had no value supplied at render time.
    #[error("no value supplied for placeholder '{0}'")]
    MissingValue(String),
}
