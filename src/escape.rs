//! Backslash escapes for control characters in translation keys and values.
//!
//! Recognized escapes: `\n \r \f \t \v \b \\`, `\xH` to `\xHHHH` (1 to 4 hex digits),
//! `\uHHHH` and `\UHHHHHHHH`. Anything else is left untouched by [`decode`].

/// Encodes `text` so that it contains no control characters.
///
/// Characters with a short escape use it; other control characters become `\xHHHH`.
/// The output always decodes back to `text`.
#[must_use]
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            '\u{08}' => out.push_str("\\b"),
            // Four digits so that a following hex digit is never absorbed.
            c if c.is_control() => out.push_str(&format!("\\x{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// Decodes every escape in `text`.
///
/// Matching is greedy and leftmost, and a consumed escape is never re-scanned, so `\\n`
/// decodes to a backslash followed by `n`. Malformed escapes pass through unchanged.
#[must_use]
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(backslash) = rest.find('\\') {
        let (literal, tail) = rest.split_at(backslash);
        out.push_str(literal);
        let after = tail.get(1..).unwrap_or_default();

        if let Some((ch, consumed)) = decode_escape(after) {
            out.push(ch);
            rest = after.get(consumed..).unwrap_or_default();
        } else {
            out.push('\\');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// Decodes the escape whose marker starts `after` (the text following a backslash).
///
/// Returns the character and the number of bytes consumed from `after`.
fn decode_escape(after: &str) -> Option<(char, usize)> {
    let mut chars = after.chars();
    let marker = chars.next()?;

    let simple = match marker {
        'n' => Some('\n'),
        'r' => Some('\r'),
        'f' => Some('\u{0c}'),
        't' => Some('\t'),
        'v' => Some('\u{0b}'),
        'b' => Some('\u{08}'),
        '\\' => Some('\\'),
        _ => None,
    };
    if let Some(ch) = simple {
        return Some((ch, 1));
    }

    let (min_digits, max_digits) = match marker {
        'x' => (1, 4),
        'u' => (4, 4),
        'U' => (8, 8),
        _ => return None,
    };
    let digits = chars.take(max_digits).take_while(char::is_ascii_hexdigit).count();
    if digits < min_digits {
        return None;
    }

    let hex = after.get(1..=digits)?;
    let code = u32::from_str_radix(hex, 16).ok()?;
    let ch = char::from_u32(code)?;
    Some((ch, 1 + digits))
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("no escapes", "no escapes")]
    #[case::newline("a\\nb", "a\nb")]
    #[case::all_simple("\\n\\r\\f\\t\\v\\b\\\\", "\n\r\u{0c}\t\u{0b}\u{08}\\")]
    #[case::escaped_backslash_then_n("\\\\n", "\\n")]
    #[case::hex_one_digit("\\x9", "\t")]
    #[case::hex_greedy("\\x41G", "AG")]
    #[case::hex_max_four("\\x00411", "A1")]
    #[case::unicode("\\u00e9t\\u00E9", "été")]
    #[case::long_unicode("\\U0001F600", "\u{1F600}")]
    #[case::unknown_escape("\\q", "\\q")]
    #[case::trailing_backslash("end\\", "end\\")]
    #[case::hex_without_digits("\\xZ", "\\xZ")]
    #[case::short_unicode("\\u12", "\\u12")]
    #[case::short_long_unicode("\\U1234567", "\\U1234567")]
    #[case::surrogate("\\uD800", "\\uD800")]
    #[case::out_of_range("\\U00110000", "\\U00110000")]
    #[case::invalid_then_valid("\\q\\n", "\\q\n")]
    fn decode_cases(#[case] encoded: &str, #[case] expected: &str) {
        assert_that!(decode(encoded), eq(expected));
    }

    #[rstest]
    #[case::newline("line1\nline2", "line1\\nline2")]
    #[case::backslash("C:\\dir", "C:\\\\dir")]
    #[case::bell("ding\u{07}", "ding\\x0007")]
    #[case::unicode_untouched("¿Qué?", "¿Qué?")]
    fn encode_cases(#[case] text: &str, #[case] expected: &str) {
        assert_that!(encode(text), eq(expected));
    }

    #[rstest]
    #[case("\n\r\u{0c}\t\u{0b}\u{08}\\")]
    #[case("\\\\n\\x41")]
    #[case("tab\there\u{07}1F and \u{1b}[0m")]
    fn decode_reverses_encode(#[case] text: &str) {
        assert_that!(decode(&encode(text)), eq(text));
    }
}
