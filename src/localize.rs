//! The lookup surface shared by catalogs and scopes.

use crate::format::{
    FormatArg,
    FormatError,
    FormatProfile,
    substitute,
};

/// A lookup request: a plain key, or a template with its pre-evaluated arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// A key to localize.
    Plain(&'a str),
    /// A template key, formatted after lookup.
    Template(&'a str, &'a [FormatArg]),
}

/// Translation lookup with context fallback.
///
/// Missing translations are never an error: the key itself is the last fallback.
pub trait Localize {
    /// Translation of `key`, or `key` itself when untranslated.
    fn localize<'s>(&'s self, key: &'s str) -> &'s str;

    /// Formatting profile applied by [`Localize::localize_format`].
    fn profile(&self) -> &FormatProfile;

    /// Localizes every key, preserving order and length.
    fn localize_all<'s>(&'s self, keys: &[&'s str]) -> Vec<&'s str> {
        keys.iter().map(|&key| self.localize(key)).collect()
    }

    /// Localizes `template`, then substitutes `args` into whichever text was found.
    ///
    /// Placeholders are taken from the translated template, not from `template`.
    ///
    /// # Errors
    /// Returns [`FormatError`] if the resolved template cannot be formatted with `args`.
    fn localize_format(
        &self,
        template: &str,
        args: &[FormatArg],
    ) -> Result<String, FormatError> {
        substitute(self.localize(template), args, self.profile())
    }

    /// Dispatches a [`Lookup`].
    ///
    /// # Errors
    /// Only [`Lookup::Template`] can fail, see [`Localize::localize_format`].
    fn resolve(&self, lookup: Lookup<'_>) -> Result<String, FormatError> {
        match lookup {
            Lookup::Plain(key) => Ok(self.localize(key).to_string()),
            Lookup::Template(template, args) => self.localize_format(template, args),
        }
    }
}

/// Localizes a template and substitutes the remaining arguments.
///
/// ```
/// use context_i18n::{Catalog, localize_format};
///
/// let catalog = Catalog::for_tag("en");
/// let text = localize_format!(catalog, "{0} of {1}", 3, "ten");
/// assert_eq!(text.ok().as_deref(), Some("3 of ten"));
/// ```
#[macro_export]
macro_rules! localize_format {
    ($localizer:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::Localize as _;
        ($localizer).localize_format($template, &[$($crate::FormatArg::from($arg)),*])
    }};
}
