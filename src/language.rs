//! Target language identifiers.

use std::fmt;

use crate::format::FormatProfile;

/// How a translation's `lang` attribute relates to the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageMatch {
    /// Equals the full tag (e.g. `es-ar`).
    Full,
    /// Equals the primary subtag (e.g. `es`).
    Primary,
    /// Unrelated language.
    NoMatch,
}

/// A normalized language tag bound to a formatting profile.
///
/// Immutable once built; a catalog is retargeted by replacing its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageId {
    /// Lowercased tag.
    full: String,
    /// Text before the first `-`, if the tag has one.
    primary: Option<String>,
    /// Number and date conventions used when formatting.
    profile: FormatProfile,
}

impl LanguageId {
    /// Builds an identifier from a free-form tag, resolving its formatting profile.
    ///
    /// Unknown locales silently use the invariant profile.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self::with_profile(tag, FormatProfile::resolve(tag))
    }

    /// Builds an identifier from a tag and an externally supplied profile.
    #[must_use]
    pub fn with_profile(tag: &str, profile: FormatProfile) -> Self {
        let full = tag.to_lowercase();
        let primary = full.split_once('-').map(|(primary, _)| primary.to_string());
        Self { full, primary, profile }
    }

    /// Builds an identifier for the locale a profile was made for.
    #[must_use]
    pub fn from_profile(profile: FormatProfile) -> Self {
        let tag = profile.name().to_string();
        Self::with_profile(&tag, profile)
    }

    /// The locale-neutral identifier (empty tag, invariant profile).
    #[must_use]
    pub fn invariant() -> Self {
        Self::with_profile("", FormatProfile::invariant())
    }

    /// The normalized tag.
    #[must_use]
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Primary subtag of a regional tag (`fr` for `fr-ca`).
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    #[must_use]
    pub const fn profile(&self) -> &FormatProfile {
        &self.profile
    }

    /// Classifies a `lang` attribute against this identifier (case-insensitive).
    #[must_use]
    pub fn classify(&self, lang: &str) -> LanguageMatch {
        let lang = lang.to_lowercase();
        if lang == self.full {
            LanguageMatch::Full
        } else if self.primary.as_deref() == Some(lang.as_str()) {
            LanguageMatch::Primary
        } else {
            LanguageMatch::NoMatch
        }
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::invariant()
    }
}

impl From<&str> for LanguageId {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<FormatProfile> for LanguageId {
    fn from(profile: FormatProfile) -> Self {
        Self::from_profile(profile)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}
