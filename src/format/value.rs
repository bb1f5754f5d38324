//! Format arguments and their culture-aware rendering.

use std::fmt::Write as _;

use chrono::{
    DateTime,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    TimeZone,
};

use super::FormatError;
use super::profile::FormatProfile;

/// Default number of decimals for the `N`, `F` and `P` specs.
const DEFAULT_DECIMALS: usize = 2;

/// A single argument of a format template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// A signed integer and the bit width of its source type.
    ///
    /// The width limits hexadecimal output of negative values: `-1_i32` renders as
    /// `FFFFFFFF` under `X`.
    Int(i64, u32),
    /// Any unsigned integer.
    UInt(u64),
    /// `f32` or `f64`.
    Float(f64),
    /// Rendered as `true` / `false`.
    Bool(bool),
    /// Rendered as-is.
    Char(char),
    /// Rendered as-is.
    Str(String),
    /// Formatted with `d` or a strftime pattern.
    Date(NaiveDate),
    /// Formatted with `t` or a strftime pattern.
    Time(NaiveTime),
    /// Formatted with `g` (default), `d`, `t` or a strftime pattern.
    DateTime(NaiveDateTime),
}

macro_rules! impl_from {
    ($variant:ident <= $($ty:ty),+) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    Self::Int(value.into(), <$ty>::BITS)
                }
            }
        )+
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from!(UInt <= u8, u16, u32, u64);
impl_from!(Float <= f32, f64);
impl_from!(Bool <= bool);
impl_from!(Char <= char);
impl_from!(Str <= String, &str, &String);
impl_from!(Date <= NaiveDate);
impl_from!(Time <= NaiveTime);
impl_from!(DateTime <= NaiveDateTime);

impl From<isize> for FormatArg {
    fn from(value: isize) -> Self {
        i64::try_from(value)
            .map_or_else(|_| Self::Str(value.to_string()), |v| Self::Int(v, isize::BITS))
    }
}

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::UInt)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FormatArg {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.naive_local())
    }
}

/// A parsed standard numeric spec such as `N2` or `X4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumericSpec {
    /// Format letter, case preserved (`x` and `X` differ).
    letter: char,
    /// Digits after the letter.
    precision: Option<usize>,
}

impl NumericSpec {
    /// `None` unless `spec` is one ASCII letter followed by at most two digits.
    fn parse(spec: &str) -> Option<Self> {
        let mut chars = spec.chars();
        let letter = chars.next().filter(char::is_ascii_alphabetic)?;
        let digits = chars.as_str();
        let precision = if digits.is_empty() {
            None
        } else if digits.len() <= 2 && digits.bytes().all(|b| b.is_ascii_digit()) {
            digits.parse().ok()
        } else {
            return None;
        };
        Some(Self { letter, precision })
    }
}

impl FormatArg {
    /// Short name of the argument kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(..) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "date-time",
        }
    }

    /// Renders the argument under `profile`, honoring an optional format spec.
    ///
    /// Strings, chars and booleans ignore the spec.
    ///
    /// # Errors
    /// Returns [`FormatError::InvalidFormatSpec`] when the spec does not apply to this argument.
    pub fn render(
        &self,
        spec: Option<&str>,
        profile: &FormatProfile,
    ) -> Result<String, FormatError> {
        match self {
            Self::Int(value, _) => self.render_integer(i128::from(*value), spec, profile),
            Self::UInt(value) => self.render_integer(i128::from(*value), spec, profile),
            Self::Float(value) => self.render_float(*value, spec, profile),
            Self::Bool(value) => Ok(value.to_string()),
            Self::Char(value) => Ok(value.to_string()),
            Self::Str(value) => Ok(value.clone()),
            Self::Date(value) => {
                let pattern = date_pattern(spec, profile, DateParts::Date);
                self.render_chrono(&value.format(&pattern), spec)
            }
            Self::Time(value) => {
                let pattern = date_pattern(spec, profile, DateParts::Time);
                self.render_chrono(&value.format(&pattern), spec)
            }
            Self::DateTime(value) => {
                let pattern = date_pattern(spec, profile, DateParts::Both);
                self.render_chrono(&value.format(&pattern), spec)
            }
        }
    }

    /// Error for a spec this argument kind does not accept.
    fn invalid_spec(&self, spec: Option<&str>) -> FormatError {
        FormatError::InvalidFormatSpec {
            spec: spec.unwrap_or_default().to_string(),
            kind: self.kind(),
        }
    }

    /// Renders an integer under `G D N F X P`.
    fn render_integer(
        &self,
        value: i128,
        spec: Option<&str>,
        profile: &FormatProfile,
    ) -> Result<String, FormatError> {
        let Some(raw) = spec.filter(|s| !s.is_empty()) else {
            return Ok(value.to_string());
        };
        let NumericSpec { letter, precision } =
            NumericSpec::parse(raw).ok_or_else(|| self.invalid_spec(spec))?;

        let rendered = match letter.to_ascii_uppercase() {
            'G' => value.to_string(),
            'D' => {
                let width = precision.unwrap_or(0);
                let sign = if value < 0 { "-" } else { "" };
                format!("{sign}{:0width$}", value.unsigned_abs())
            }
            'N' | 'F' => {
                let decimals = precision.unwrap_or(DEFAULT_DECIMALS);
                let plain = if decimals == 0 {
                    value.to_string()
                } else {
                    format!("{value}.{}", "0".repeat(decimals))
                };
                profile.localize_number(&plain, letter.eq_ignore_ascii_case(&'N'))
            }
            'X' => {
                let width = precision.unwrap_or(0);
                let hex = match self {
                    Self::Int(v, bits) if *v < 0 => {
                        format!("{:0width$X}", twos_complement(*v, *bits))
                    }
                    _ => format!("{value:0width$X}"),
                };
                if letter == 'x' { hex.to_lowercase() } else { hex }
            }
            'P' => {
                let decimals = precision.unwrap_or(DEFAULT_DECIMALS);
                let scaled = value.saturating_mul(100);
                let plain = if decimals == 0 {
                    scaled.to_string()
                } else {
                    format!("{scaled}.{}", "0".repeat(decimals))
                };
                format!("{}{}", profile.localize_number(&plain, true), profile.percent_suffix)
            }
            _ => return Err(self.invalid_spec(spec)),
        };
        Ok(rendered)
    }

    /// Renders a float under `G N F P`.
    #[allow(clippy::float_arithmetic)]
    fn render_float(
        &self,
        value: f64,
        spec: Option<&str>,
        profile: &FormatProfile,
    ) -> Result<String, FormatError> {
        let Some(raw) = spec.filter(|s| !s.is_empty()) else {
            return Ok(profile.localize_number(&value.to_string(), false));
        };
        let NumericSpec { letter, precision } =
            NumericSpec::parse(raw).ok_or_else(|| self.invalid_spec(spec))?;

        let rendered = match letter.to_ascii_uppercase() {
            'G' => profile.localize_number(&value.to_string(), false),
            'N' | 'F' => {
                let decimals = precision.unwrap_or(DEFAULT_DECIMALS);
                let plain = format!("{value:.decimals$}");
                profile.localize_number(&plain, letter.eq_ignore_ascii_case(&'N'))
            }
            'P' => {
                let decimals = precision.unwrap_or(DEFAULT_DECIMALS);
                let plain = format!("{:.decimals$}", value * 100.0);
                format!("{}{}", profile.localize_number(&plain, true), profile.percent_suffix)
            }
            _ => return Err(self.invalid_spec(spec)),
        };
        Ok(rendered)
    }

    /// Writes a chrono formatter, failing on patterns chrono cannot render.
    fn render_chrono(
        &self,
        formatted: &impl std::fmt::Display,
        spec: Option<&str>,
    ) -> Result<String, FormatError> {
        let mut out = String::new();
        write!(out, "{formatted}").map_err(|_| self.invalid_spec(spec))?;
        Ok(out)
    }
}

/// Bit pattern of `value` truncated to its `bits`-wide source type.
const fn twos_complement(value: i64, bits: u32) -> u64 {
    let raw = u64::from_ne_bytes(value.to_ne_bytes());
    if bits >= u64::BITS { raw } else { raw & ((1 << bits) - 1) }
}

/// Which parts of a date-time value the default pattern covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateParts {
    /// Short date only.
    Date,
    /// Short time only.
    Time,
    /// Short date, then short time.
    Both,
}

/// Maps a date spec to a strftime pattern.
///
/// `d`, `t` and `g` select the profile's short date, short time and both; any other spec
/// is taken as a strftime pattern.
fn date_pattern(spec: Option<&str>, profile: &FormatProfile, parts: DateParts) -> String {
    let both = || format!("{} {}", profile.date_format, profile.time_format);
    match spec.filter(|s| !s.is_empty()) {
        Some("d") => profile.date_format.clone(),
        Some("t") => profile.time_format.clone(),
        Some("g") => both(),
        Some(custom) => custom.to_string(),
        None => match parts {
            DateParts::Date => profile.date_format.clone(),
            DateParts::Time => profile.time_format.clone(),
            DateParts::Both => both(),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn invariant() -> FormatProfile {
        FormatProfile::invariant()
    }

    #[rstest]
    #[case::plain(FormatArg::from(47), None, "47")]
    #[case::general(FormatArg::from(-47), Some("G"), "-47")]
    #[case::padded(FormatArg::from(47), Some("D5"), "00047")]
    #[case::padded_negative(FormatArg::from(-47), Some("d4"), "-0047")]
    #[case::grouped(FormatArg::from(1_234_567), Some("N"), "1,234,567.00")]
    #[case::grouped_no_decimals(FormatArg::from(1_234_567_u64), Some("N0"), "1,234,567")]
    #[case::fixed(FormatArg::from(1234), Some("F1"), "1234.0")]
    #[case::hex_upper(FormatArg::from(0x2F), Some("X4"), "002F")]
    #[case::hex_lower(FormatArg::from(255_u8), Some("x"), "ff")]
    #[case::hex_negative_i8(FormatArg::from(-1_i8), Some("X"), "FF")]
    #[case::hex_negative_i16(FormatArg::from(-2_i16), Some("x"), "fffe")]
    #[case::hex_negative_i32(FormatArg::from(-1_i32), Some("X"), "FFFFFFFF")]
    #[case::hex_negative_i64(FormatArg::from(-1_i64), Some("X"), "FFFFFFFFFFFFFFFF")]
    #[case::hex_negative_padded(FormatArg::from(-1_i8), Some("X4"), "00FF")]
    #[case::percent(FormatArg::from(3), Some("P0"), "300 %")]
    fn render_integer_invariant(
        #[case] arg: FormatArg,
        #[case] spec: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_that!(arg.render(spec, &invariant()), ok(eq(expected)));
    }

    #[rstest]
    #[case::plain(FormatArg::from(3.5), None, "3.5")]
    #[case::fixed(FormatArg::from(2.0_f64 / 3.0), Some("F3"), "0.667")]
    #[case::grouped(FormatArg::from(12345.678), Some("N2"), "12,345.68")]
    #[case::percent(FormatArg::from(0.256), Some("P1"), "25.6 %")]
    fn render_float_invariant(
        #[case] arg: FormatArg,
        #[case] spec: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_that!(arg.render(spec, &invariant()), ok(eq(expected)));
    }

    #[rstest]
    fn render_float_uses_profile_separators() {
        let french = FormatProfile::resolve("fr");

        assert_that!(FormatArg::from(3.5).render(None, &french), ok(eq("3,5")));
        assert_that!(
            FormatArg::from(1234.5).render(Some("N1"), &french),
            ok(eq("1\u{202f}234,5"))
        );
    }

    #[rstest]
    #[case::hex_on_float(FormatArg::from(1.5), "X")]
    #[case::decimal_on_float(FormatArg::from(1.5), "D2")]
    #[case::unknown_letter(FormatArg::from(1), "Q")]
    #[case::custom_numeric(FormatArg::from(1), "0.00")]
    #[case::long_precision(FormatArg::from(1), "N123")]
    fn render_rejects_inapplicable_spec(#[case] arg: FormatArg, #[case] spec: &str) {
        let result = arg.render(Some(spec), &invariant());

        assert!(matches!(result, Err(FormatError::InvalidFormatSpec { .. })));
    }

    #[rstest]
    fn render_text_ignores_spec() {
        assert_that!(FormatArg::from("abc").render(Some("X4"), &invariant()), ok(eq("abc")));
        assert_that!(FormatArg::from('z').render(None, &invariant()), ok(eq("z")));
        assert_that!(FormatArg::from(true).render(None, &invariant()), ok(eq("true")));
    }

    #[rstest]
    fn render_dates_with_profile_patterns() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let stamp = date.and_hms_opt(14, 5, 0).unwrap();
        let german = FormatProfile::resolve("de");

        assert_that!(FormatArg::from(date).render(None, &german), ok(eq("09.03.2024")));
        assert_that!(FormatArg::from(stamp).render(None, &german), ok(eq("09.03.2024 14:05")));
        assert_that!(FormatArg::from(stamp).render(Some("t"), &german), ok(eq("14:05")));
        assert_that!(FormatArg::from(stamp).render(Some("%Y"), &german), ok(eq("2024")));
        assert_that!(FormatArg::from(date).render(None, &invariant()), ok(eq("03/09/2024")));
    }

    #[rstest]
    fn render_date_rejects_time_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let result = FormatArg::from(date).render(Some("%H"), &invariant());

        assert!(matches!(result, Err(FormatError::InvalidFormatSpec { .. })));
    }
}
