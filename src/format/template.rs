//! Positional placeholder substitution (`{0}`, `{0,8}`, `{0:N2}`, `{0,-8:X4}`).

use super::FormatError;
use super::profile::FormatProfile;
use super::value::FormatArg;

/// Alignments must stay strictly below this magnitude.
pub const MAX_ALIGNMENT: i64 = 1_000_000;

/// One parsed `{index[,alignment][:spec]}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder<'t> {
    /// Zero-based argument index.
    index: usize,
    /// Minimum width; negative values left-align.
    alignment: Option<i64>,
    /// Text after `:`, passed to the argument's renderer.
    spec: Option<&'t str>,
}

impl<'t> Placeholder<'t> {
    /// Parses the text between the braces. `offset` is used for error reporting only.
    fn parse(body: &'t str, offset: usize) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidPlaceholder { position: offset };

        let (head, spec) = body.split_once(':').map_or((body, None), |(h, s)| (h, Some(s)));
        let (index, alignment) =
            head.split_once(',').map_or((head, None), |(i, a)| (i, Some(a)));

        let index = index.trim();
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = index.parse().map_err(|_| invalid())?;
        let alignment = alignment
            .map(|a| a.trim().parse::<i64>().map_err(|_| invalid()))
            .transpose()?;
        if alignment.is_some_and(|a| a.unsigned_abs() >= MAX_ALIGNMENT.unsigned_abs()) {
            return Err(invalid());
        }

        Ok(Self { index, alignment, spec })
    }
}

/// Replaces every placeholder in `template` with the matching argument rendered under
/// `profile`. `{{` and `}}` produce literal braces.
///
/// Extra arguments are ignored.
///
/// # Errors
/// - [`FormatError::InvalidPlaceholder`] for unbalanced braces, a malformed placeholder,
///   or an alignment of [`MAX_ALIGNMENT`] or more in either direction
/// - [`FormatError::ArgumentIndexOutOfRange`] when a placeholder index has no argument
/// - [`FormatError::InvalidFormatSpec`] when a spec does not apply to its argument
pub fn substitute(
    template: &str,
    args: &[FormatArg],
    profile: &FormatProfile,
) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(brace) = rest.find(['{', '}']) {
        let offset = template.len() - rest.len() + brace;
        let (literal, tail) = rest.split_at(brace);
        out.push_str(literal);

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
        } else if let Some(open) = tail.strip_prefix('{') {
            let close =
                open.find('}').ok_or(FormatError::InvalidPlaceholder { position: offset })?;
            let (body, after) = open.split_at(close);
            if body.contains('{') {
                return Err(FormatError::InvalidPlaceholder { position: offset });
            }

            let placeholder = Placeholder::parse(body, offset)?;
            let arg = args.get(placeholder.index).ok_or(FormatError::ArgumentIndexOutOfRange {
                index: placeholder.index,
                count: args.len(),
            })?;
            let rendered = arg.render(placeholder.spec, profile)?;
            push_aligned(&mut out, &rendered, placeholder.alignment);

            rest = after.strip_prefix('}').unwrap_or(after);
        } else {
            return Err(FormatError::InvalidPlaceholder { position: offset });
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Appends `rendered`, space-padded to `|alignment|` characters; left-aligned when negative.
fn push_aligned(out: &mut String, rendered: &str, alignment: Option<i64>) {
    let Some(alignment) = alignment else {
        out.push_str(rendered);
        return;
    };

    let width = usize::try_from(alignment.unsigned_abs()).unwrap_or(usize::MAX);
    let padding = width.saturating_sub(rendered.chars().count());
    if alignment < 0 {
        out.push_str(rendered);
        out.extend(std::iter::repeat_n(' ', padding));
    } else {
        out.extend(std::iter::repeat_n(' ', padding));
        out.push_str(rendered);
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn render(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
        substitute(template, args, &FormatProfile::invariant())
    }

    #[rstest]
    #[case::no_placeholders("plain text", "plain text")]
    #[case::single("Value: {0}", "Value: 47")]
    #[case::repeated("{0}-{0}", "47-47")]
    #[case::reordered("{1} before {0}", "abc before 47")]
    #[case::spec("Value: {0:X4}", "Value: 002F")]
    #[case::right_aligned("[{0,5}]", "[   47]")]
    #[case::left_aligned("[{0,-5}]", "[47   ]")]
    #[case::aligned_with_spec("[{0,6:D4}]", "[  0047]")]
    #[case::escaped_braces("{{{0}}}", "{47}")]
    #[case::spaces_in_placeholder("{ 1 , 4 }", " abc")]
    fn substitute_placeholders(#[case] template: &str, #[case] expected: &str) {
        let args = [FormatArg::from(0x2F), FormatArg::from("abc")];

        assert_that!(render(template, &args), ok(eq(expected)));
    }

    #[rstest]
    fn extra_arguments_are_ignored() {
        let args = [FormatArg::from(1), FormatArg::from(2), FormatArg::from(3)];

        assert_that!(render("{1}", &args), ok(eq("2")));
    }

    #[rstest]
    fn index_beyond_arguments_fails() {
        let args = [FormatArg::from(1)];

        assert_that!(
            render("{0} {2}", &args),
            err(eq(&FormatError::ArgumentIndexOutOfRange { index: 2, count: 1 }))
        );
    }

    #[rstest]
    #[case::unclosed("Value {0", 6)]
    #[case::lone_close("oops }", 5)]
    #[case::empty_index("{}", 0)]
    #[case::non_numeric("{name}", 0)]
    #[case::bad_alignment("ab{0,x}", 2)]
    #[case::nested_open("ab {0{1}}", 3)]
    #[case::alignment_at_limit("x{0,1000000}", 1)]
    #[case::negative_alignment_at_limit("{0,-1000000}", 0)]
    #[case::alignment_i64_max("ab {0,9223372036854775807}", 3)]
    #[case::alignment_i64_min("{1,-9223372036854775808}", 0)]
    fn malformed_placeholders_fail(#[case] template: &str, #[case] position: usize) {
        let args = [FormatArg::from(1), FormatArg::from(2)];

        assert_that!(
            render(template, &args),
            err(eq(&FormatError::InvalidPlaceholder { position }))
        );
    }

    #[rstest]
    fn alignment_just_below_limit_pads() {
        let result = render("{0,999999}", &[FormatArg::from(7)]);

        assert_that!(result.map(|s| s.len()).ok(), some(eq(999_999)));
    }

    #[rstest]
    fn uses_profile_for_rendering() {
        let german = FormatProfile::resolve("de");

        let result = substitute("Summe: {0:N2}", &[FormatArg::from(1234.5)], &german);

        assert_that!(result, ok(eq("Summe: 1.234,50")));
    }
}
