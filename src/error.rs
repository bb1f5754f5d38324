//! Errors raised while loading translation documents.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::SourcePosition;

/// Ways a translation document can violate the expected schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureErrorKind {
    /// The root element is not `I18N`.
    InvalidRoot,
    /// An element other than `Entry` or `Context` inside `I18N` or `Context`.
    InvalidElement,
    /// An `Entry` without `Key`.
    MissingKey,
    /// An `Entry` with more than one `Key`.
    TooManyKeys,
    /// A `Value` without `lang`.
    MissingLang,
    /// A `Context` without `id`.
    MissingId,
    /// Two values of one entry both match the target language at the same level.
    DuplicateLanguage,
}

impl StructureErrorKind {
    /// Fixed message shown for this kind.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidRoot => "invalid root element",
            Self::InvalidElement => "invalid element",
            Self::MissingKey => "missing Key",
            Self::TooManyKeys => "too many Key elements",
            Self::MissingLang => "missing lang attribute",
            Self::MissingId => "missing id attribute",
            Self::DuplicateLanguage => "duplicate value for language",
        }
    }
}

impl fmt::Display for StructureErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A schema violation, with the position of the offending element when known.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{}", line_suffix(.position.as_ref()))]
pub struct StructureError {
    /// What is wrong.
    pub kind: StructureErrorKind,
    /// Start of the offending element.
    pub position: Option<SourcePosition>,
}

impl StructureError {
    /// Creates a structure error.
    #[must_use]
    pub const fn new(kind: StructureErrorKind, position: Option<SourcePosition>) -> Self {
        Self { kind, position }
    }
}

/// ` (line N)` when the position is known.
fn line_suffix(position: Option<&SourcePosition>) -> String {
    position.map(|p| format!(" (line {})", p.line)).unwrap_or_default()
}

/// Defines errors that may occur while loading a translation document
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document is not well-formed XML
    #[error("Failed to parse translation document: {0}")]
    Syntax(#[from] roxmltree::Error),
    /// The document does not follow the translation schema
    #[error("Invalid translation document: {0}")]
    Structure(#[from] StructureError),
    /// The document could not be located
    #[error("Translation document not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },
    /// The document could not be read
    #[error("Failed to read translation document: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// The schema violation behind this error, if any.
    #[must_use]
    pub const fn structure(&self) -> Option<&StructureError> {
        match self {
            Self::Structure(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn structure_error_display_includes_line() {
        let error = StructureError::new(
            StructureErrorKind::MissingKey,
            Some(SourcePosition { line: 4, column: 3 }),
        );

        assert_that!(error.to_string(), eq("missing Key (line 4)"));
    }

    #[rstest]
    fn structure_error_display_without_position() {
        let error = StructureError::new(StructureErrorKind::DuplicateLanguage, None);

        assert_that!(error.to_string(), eq("duplicate value for language"));
    }

    #[rstest]
    fn load_error_wraps_structure_error() {
        let error = LoadError::from(StructureError::new(StructureErrorKind::InvalidRoot, None));

        assert_that!(error.to_string(), eq("Invalid translation document: invalid root element"));
        assert_that!(
            error.structure().map(|e| e.kind),
            some(eq(StructureErrorKind::InvalidRoot))
        );
    }
}
