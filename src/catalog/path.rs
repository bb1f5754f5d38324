//! Context paths.

/// Separator between segments of a composite context id (`"A.B"`).
pub const CONTEXT_SEPARATOR: char = '.';

/// A context path, either a composite id or pre-split segments.
///
/// Segments of [`ContextPath::Segments`] are used verbatim, never re-split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextPath<'a> {
    /// A `.`-separated id such as `"Menu.File"`.
    Composite(&'a str),
    /// Segments taken verbatim.
    Segments(Vec<&'a str>),
}

impl<'a> ContextPath<'a> {
    /// Ordered segments of the path.
    ///
    /// Composite ids are split on every `.`, keeping empty segments (`"A..B"` has three).
    #[must_use]
    pub fn segments(&self) -> Vec<&'a str> {
        match self {
            Self::Composite(id) => id.split(CONTEXT_SEPARATOR).collect(),
            Self::Segments(segments) => segments.clone(),
        }
    }
}

impl<'a> From<&'a str> for ContextPath<'a> {
    fn from(id: &'a str) -> Self {
        Self::Composite(id)
    }
}

impl<'a> From<&'a String> for ContextPath<'a> {
    fn from(id: &'a String) -> Self {
        Self::Composite(id)
    }
}

impl<'a> From<Vec<&'a str>> for ContextPath<'a> {
    fn from(segments: Vec<&'a str>) -> Self {
        Self::Segments(segments)
    }
}

impl<'a> From<&[&'a str]> for ContextPath<'a> {
    fn from(segments: &[&'a str]) -> Self {
        Self::Segments(segments.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for ContextPath<'a> {
    fn from(segments: [&'a str; N]) -> Self {
        Self::Segments(segments.to_vec())
    }
}

impl<'a> From<&'a [String]> for ContextPath<'a> {
    fn from(segments: &'a [String]) -> Self {
        Self::Segments(segments.iter().map(String::as_str).collect())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::single("A", vec!["A"])]
    #[case::composite("A.B.C", vec!["A", "B", "C"])]
    #[case::empty_segment("A..B", vec!["A", "", "B"])]
    #[case::empty("", vec![""])]
    fn composite_splits_on_dots(#[case] id: &str, #[case] expected: Vec<&str>) {
        assert_that!(ContextPath::from(id).segments(), eq(&expected));
    }

    #[rstest]
    fn segments_are_not_resplit() {
        let path = ContextPath::from(["A.B", "C"]);

        assert_that!(path.segments(), elements_are![eq(&"A.B"), eq(&"C")]);
    }

    #[rstest]
    fn owned_segments_convert() {
        let owned = vec!["X".to_string(), "Y".to_string()];

        let path = ContextPath::from(owned.as_slice());

        assert_that!(path, eq(&ContextPath::Segments(vec!["X", "Y"])));
    }
}
