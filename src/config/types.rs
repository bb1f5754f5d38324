use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::format::FormatProfile;
use crate::language::LanguageId;

/// A single problem found in [`I18nSettings`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "profiles.fr.groupSize")
    pub field_path: String,
    /// What is wrong and how to fix it.
    pub message: String,
}

impl ValidationError {
    /// Creates an error for the field at `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Why settings could not be built.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Parsed, but failed [`I18nSettings::validate`].
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// Malformed JSON or mistyped fields.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Language settings supplied by the embedding application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Target language tag.
    ///
    /// - `None`: the invariant language, every key is returned untranslated (default)
    /// - `Some("fr-ca")`: translations for `fr-ca`, falling back to `fr`
    pub language: Option<String>,

    /// Formatting overrides keyed by language tag (case-insensitive).
    pub profiles: HashMap<String, ProfileOverride>,
}

/// Replaces parts of a built-in formatting profile. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileOverride {
    /// Single character.
    pub decimal_separator: Option<String>,
    /// Single character.
    pub group_separator: Option<String>,
    /// Digits per group, at least 1.
    pub group_size: Option<usize>,
    /// `strftime` pattern used by the `d` date format.
    pub date_format: Option<String>,
    /// `strftime` pattern used by the `t` time format.
    pub time_format: Option<String>,
}

impl ProfileOverride {
    /// Writes the set fields into `profile`.
    ///
    /// Separators use their first character; [`I18nSettings::validate`] rejects longer ones.
    pub fn apply(&self, profile: &mut FormatProfile) {
        if let Some(c) = self.decimal_separator.as_deref().and_then(|s| s.chars().next()) {
            profile.decimal_separator = c;
        }
        if let Some(c) = self.group_separator.as_deref().and_then(|s| s.chars().next()) {
            profile.group_separator = c;
        }
        if let Some(size) = self.group_size {
            profile.group_size = size;
        }
        if let Some(format) = &self.date_format {
            format.clone_into(&mut profile.date_format);
        }
        if let Some(format) = &self.time_format {
            format.clone_into(&mut profile.time_format);
        }
    }

    /// Appends the problems of the override registered under `tag` to `errors`.
    fn validate(&self, tag: &str, errors: &mut Vec<ValidationError>) {
        let separators =
            [("decimalSeparator", &self.decimal_separator), ("groupSeparator", &self.group_separator)];
        for (field, separator) in separators {
            if let Some(separator) = separator
                && separator.chars().count() != 1
            {
                errors.push(ValidationError::new(
                    format!("profiles.{tag}.{field}"),
                    format!("A separator must be exactly one character, found '{separator}'"),
                ));
            }
        }

        if let (Some(decimal), Some(group)) = (&self.decimal_separator, &self.group_separator)
            && decimal == group
        {
            errors.push(ValidationError::new(
                format!("profiles.{tag}"),
                "The decimal and group separators must differ",
            ));
        }

        if self.group_size == Some(0) {
            errors.push(ValidationError::new(
                format!("profiles.{tag}.groupSize"),
                "The group size must be at least 1",
            ));
        }

        for (field, format) in [("dateFormat", &self.date_format), ("timeFormat", &self.time_format)]
        {
            if format.as_deref().is_some_and(str::is_empty) {
                errors.push(ValidationError::new(
                    format!("profiles.{tag}.{field}"),
                    "The format cannot be empty. Example: \"%d/%m/%Y\", or remove this field",
                ));
            }
        }
    }
}

impl I18nSettings {
    /// Parses camelCase JSON text and validates the result.
    ///
    /// # Errors
    /// - [`ConfigError::ParseError`] for malformed JSON or mistyped fields
    /// - [`ConfigError::ValidationErrors`] if [`I18nSettings::validate`] fails
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(?settings, "Language settings parsed");
        Ok(settings)
    }

    /// The configured target language, with its profile overrides applied.
    #[must_use]
    pub fn target_language(&self) -> LanguageId {
        let tag = self.language.as_deref().unwrap_or_default();
        let mut profile =
            if tag.is_empty() { FormatProfile::invariant() } else { FormatProfile::resolve(tag) };

        if let Some(profile_override) = self.profile_override(tag) {
            profile_override.apply(&mut profile);
        }
        LanguageId::with_profile(tag, profile)
    }

    /// Override for `tag`, falling back to its primary language.
    fn profile_override(&self, tag: &str) -> Option<&ProfileOverride> {
        let find = |wanted: &str| {
            self.profiles
                .iter()
                .find(|(key, _)| key.replace('_', "-").eq_ignore_ascii_case(wanted))
                .map(|(_, value)| value)
        };
        let tag = tag.replace('_', "-");
        find(&tag).or_else(|| tag.split_once('-').and_then(|(primary, _)| find(primary)))
    }

    /// Checks every field and collects all problems.
    ///
    /// # Errors
    /// - Empty language tag
    /// - Invalid profile override
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(language) = &self.language
            && language.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "language",
                "The language cannot be empty. Specify a tag (e.g., \"fr-ca\"), or remove this field",
            ));
        }

        let mut tags: Vec<&String> = self.profiles.keys().collect();
        tags.sort();
        for tag in tags {
            if let Some(profile_override) = self.profiles.get(tag) {
                profile_override.validate(tag, &mut errors);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
