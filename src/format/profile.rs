//! Culture formatting profiles.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Number and date conventions of one locale.
///
/// Date and time patterns are `chrono` strftime patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatProfile {
    /// Locale tag the profile was built for (`""` for the invariant profile).
    name: String,
    /// Separates the integer and fractional parts.
    pub decimal_separator: char,
    /// Inserted between digit groups.
    pub group_separator: char,
    /// Digits per group in grouped numbers (`N` spec).
    pub group_size: usize,
    /// Short date pattern (`d` spec).
    pub date_format: String,
    /// Short time pattern (`t` spec).
    pub time_format: String,
    /// Appended to percentages (`P` spec), e.g. `"%"` or `"\u{a0}%"`.
    pub percent_suffix: String,
}

/// Built-in profile rows: tag, decimal, group, date, time, percent suffix.
const BUILTIN_PROFILES: &[(&str, char, char, &str, &str, &str)] = &[
    ("en", '.', ',', "%-m/%-d/%Y", "%-I:%M %p", "%"),
    ("en-us", '.', ',', "%-m/%-d/%Y", "%-I:%M %p", "%"),
    ("en-gb", '.', ',', "%d/%m/%Y", "%H:%M", "%"),
    ("en-au", '.', ',', "%-d/%m/%Y", "%-I:%M %p", "%"),
    ("fr", ',', '\u{202f}', "%d/%m/%Y", "%H:%M", "\u{a0}%"),
    ("fr-ca", ',', '\u{a0}', "%Y-%m-%d", "%H h %M", "\u{a0}%"),
    ("fr-ch", '.', '\u{202f}', "%d.%m.%Y", "%H:%M", "\u{a0}%"),
    ("de", ',', '.', "%d.%m.%Y", "%H:%M", "\u{a0}%"),
    ("de-ch", '.', '\u{2019}', "%d.%m.%Y", "%H:%M", "%"),
    ("es", ',', '.', "%d/%m/%Y", "%H:%M", "\u{a0}%"),
    ("es-mx", '.', ',', "%d/%m/%Y", "%H:%M", "\u{a0}%"),
    ("it", ',', '.', "%d/%m/%Y", "%H:%M", "%"),
    ("nl", ',', '.', "%d-%m-%Y", "%H:%M", "\u{a0}%"),
    ("pt", ',', '\u{a0}', "%d/%m/%Y", "%H:%M", "%"),
    ("pt-br", ',', '.', "%d/%m/%Y", "%H:%M", "%"),
    ("ru", ',', '\u{a0}', "%d.%m.%Y", "%H:%M", "\u{a0}%"),
    ("pl", ',', '\u{a0}', "%d.%m.%Y", "%H:%M", "%"),
    ("sv", ',', '\u{a0}', "%Y-%m-%d", "%H:%M", "\u{a0}%"),
    ("ja", '.', ',', "%Y/%m/%d", "%H:%M", "%"),
    ("zh", '.', ',', "%Y/%-m/%-d", "%H:%M", "%"),
    ("ko", '.', ',', "%Y. %-m. %-d.", "%p %-I:%M", "%"),
];

/// Built-in profiles keyed by normalized tag.
static PROFILES: LazyLock<HashMap<&'static str, FormatProfile>> = LazyLock::new(|| {
    BUILTIN_PROFILES
        .iter()
        .map(|&(tag, decimal, group, date, time, percent)| {
            let profile = FormatProfile {
                name: tag.to_string(),
                decimal_separator: decimal,
                group_separator: group,
                group_size: 3,
                date_format: date.to_string(),
                time_format: time.to_string(),
                percent_suffix: percent.to_string(),
            };
            (tag, profile)
        })
        .collect()
});

impl FormatProfile {
    /// Locale-neutral profile used when no locale-specific one is known.
    #[must_use]
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            decimal_separator: '.',
            group_separator: ',',
            group_size: 3,
            date_format: "%m/%d/%Y".to_string(),
            time_format: "%H:%M:%S".to_string(),
            percent_suffix: " %".to_string(),
        }
    }

    /// Looks up a built-in profile by exact tag (case-insensitive, `_` accepted as `-`).
    #[must_use]
    pub fn builtin(tag: &str) -> Option<Self> {
        PROFILES.get(normalize_tag(tag).as_str()).cloned()
    }

    /// Resolves the profile for `tag`: exact tag, then its primary subtag, then invariant.
    ///
    /// Never fails.
    #[must_use]
    pub fn resolve(tag: &str) -> Self {
        let normalized = normalize_tag(tag);
        if let Some(profile) = PROFILES.get(normalized.as_str()) {
            return profile.clone();
        }

        if let Some((primary, _)) = normalized.split_once('-')
            && let Some(profile) = PROFILES.get(primary)
        {
            return profile.clone().renamed(&normalized);
        }

        if !normalized.is_empty() {
            tracing::debug!(tag = %tag, "No formatting profile for locale, using invariant");
        }
        Self::invariant().renamed(&normalized)
    }

    /// Builds a custom profile named `tag`, starting from the invariant conventions.
    #[must_use]
    pub fn custom(tag: &str) -> Self {
        Self::invariant().renamed(&normalize_tag(tag))
    }

    /// Same conventions under another name.
    fn renamed(mut self, name: &str) -> Self {
        name.clone_into(&mut self.name);
        self
    }

    /// Locale tag of the profile.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rewrites a plain ASCII number (`-1234.5`) with this profile's separators.
    ///
    /// Digit grouping is applied to the integer part when `grouped` is set.
    #[must_use]
    pub fn localize_number(&self, plain: &str, grouped: bool) -> String {
        let (sign, unsigned) = plain.strip_prefix('-').map_or(("", plain), |rest| ("-", rest));
        let (integer, fraction) =
            unsigned.split_once('.').map_or((unsigned, None), |(i, f)| (i, Some(f)));

        let mut out = String::with_capacity(plain.len() + plain.len() / 3);
        out.push_str(sign);
        if grouped {
            out.push_str(&self.group_digits(integer));
        } else {
            out.push_str(integer);
        }
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Inserts the group separator into a run of ASCII digits; other input is returned unchanged.
    fn group_digits(&self, digits: &str) -> String {
        if self.group_size == 0 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return digits.to_string();
        }

        let len = digits.len();
        let mut out = String::with_capacity(len + len / self.group_size);
        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (len - index) % self.group_size == 0 {
                out.push(self.group_separator);
            }
            out.push(digit);
        }
        out
    }
}

impl Default for FormatProfile {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Lowercase with `_` replaced by `-`.
fn normalize_tag(tag: &str) -> String {
    tag.to_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::exact("fr", "fr", ',')]
    #[case::case_insensitive("EN-GB", "en-gb", '.')]
    #[case::underscore("pt_BR", "pt-br", ',')]
    #[case::primary_fallback("de-AT", "de-at", ',')]
    #[case::unknown("xx-YY", "xx-yy", '.')]
    fn resolve_falls_back_to_primary_then_invariant(
        #[case] tag: &str,
        #[case] expected_name: &str,
        #[case] expected_decimal: char,
    ) {
        let profile = FormatProfile::resolve(tag);

        assert_that!(profile.name(), eq(expected_name));
        assert_that!(profile.decimal_separator, eq(expected_decimal));
    }

    #[googletest::test]
    fn resolve_unknown_uses_invariant_conventions() {
        let profile = FormatProfile::resolve("tlh");

        expect_that!(profile.group_separator, eq(','));
        expect_that!(profile.date_format, eq("%m/%d/%Y"));
    }

    #[googletest::test]
    fn builtin_requires_exact_tag() {
        expect_that!(FormatProfile::builtin("de"), some(anything()));
        expect_that!(FormatProfile::builtin("de-at"), none());
    }

    #[rstest]
    #[case::short("12", "12")]
    #[case::three("123", "123")]
    #[case::four("1234", "1,234")]
    #[case::seven("1234567", "1,234,567")]
    #[case::negative("-1234567.25", "-1,234,567.25")]
    fn localize_number_grouped_invariant(#[case] plain: &str, #[case] expected: &str) {
        assert_that!(FormatProfile::invariant().localize_number(plain, true), eq(expected));
    }

    #[googletest::test]
    fn localize_number_uses_profile_separators() {
        let german = FormatProfile::resolve("de");

        expect_that!(german.localize_number("1234567.5", true), eq("1.234.567,5"));
        expect_that!(german.localize_number("1234567.5", false), eq("1234567,5"));
    }

    #[rstest]
    fn localize_number_custom_group_size() {
        let profile = FormatProfile { group_size: 4, ..FormatProfile::custom("x-test") };

        assert_that!(profile.localize_number("123456789", true), eq("1,2345,6789"));
    }

    #[rstest]
    fn zero_group_size_disables_grouping() {
        let profile = FormatProfile { group_size: 0, ..FormatProfile::invariant() };

        assert_that!(profile.localize_number("123456", true), eq("123456"));
    }
}
