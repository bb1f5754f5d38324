//! Core types used throughout the project.

use std::fmt;

/// A position in a translation document (1-indexed, as reported by the XML parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePosition {
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl From<roxmltree::TextPos> for SourcePosition {
    fn from(pos: roxmltree::TextPos) -> Self {
        Self { line: pos.row, column: pos.col }
    }
}

impl SourcePosition {
    /// Position of the start tag of `node` within `document`.
    #[must_use]
    pub fn of_node(document: &roxmltree::Document<'_>, node: roxmltree::Node<'_, '_>) -> Self {
        document.text_pos_at(node.range().start).into()
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
