//! Context tree holding the translations of one target language.
//!
//! Nodes live in an arena owned by [`Catalog`]. Children are referenced top-down by
//! [`NodeId`] and every node keeps its parent's id for upward fallback, so ownership
//! never forms a cycle.

/// Context path parsing
mod path;
/// Read-only views of one context
mod scope;

use std::collections::HashMap;

pub use path::{
    CONTEXT_SEPARATOR,
    ContextPath,
};
pub use scope::Scope;

use crate::format::{
    FormatArg,
    FormatError,
    FormatProfile,
};
use crate::language::LanguageId;
use crate::localize::Localize;

/// Handle to a context node of a [`Catalog`].
///
/// Ids stay valid for the catalog's lifetime, across reloads. An id is only meaningful
/// for the catalog that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root context.
    pub const ROOT: Self = Self(0);
}

/// One context: its own translations and its sub-contexts.
#[derive(Debug, Clone, Default)]
struct Node {
    /// Segment id under the parent (`""` for the root).
    name: String,
    /// Source key to translated value.
    entries: HashMap<String, String>,
    /// Sub-contexts by segment id.
    children: HashMap<String, NodeId>,
    /// `None` only for the root.
    parent: Option<NodeId>,
}

/// A translation tree bound to a single target language.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Target language; selects values on load and the profile on format.
    language: LanguageId,
    /// Arena of contexts. Index 0 is the root and nodes are never removed.
    nodes: Vec<Node>,
}

impl Catalog {
    /// Creates an empty catalog targeting `language`.
    #[must_use]
    pub fn new(language: LanguageId) -> Self {
        Self { language, nodes: vec![Node::default()] }
    }

    /// Creates an empty catalog for a language tag.
    #[must_use]
    pub fn for_tag(tag: &str) -> Self {
        Self::new(LanguageId::new(tag))
    }

    /// The target language.
    #[must_use]
    pub const fn language(&self) -> &LanguageId {
        &self.language
    }

    /// Handle of the root context.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of context nodes, root included.
    #[must_use]
    pub fn context_count(&self) -> usize {
        self.nodes.len()
    }

    /// Descends from the root along `path`, creating missing contexts.
    ///
    /// Requesting the same path again returns the same node.
    pub fn context<'p>(&mut self, path: impl Into<ContextPath<'p>>) -> NodeId {
        self.context_in(NodeId::ROOT, path)
    }

    /// Descends from `from` along `path`, creating missing contexts.
    ///
    /// An id that does not belong to this catalog is treated as the root.
    pub fn context_in<'p>(&mut self, from: NodeId, path: impl Into<ContextPath<'p>>) -> NodeId {
        let start = if self.node(from).is_some() { from } else { NodeId::ROOT };
        path.into()
            .segments()
            .into_iter()
            .fold(start, |current, segment| self.child_or_insert(current, segment))
    }

    /// Read-only view of a context.
    #[must_use]
    pub const fn scope(&self, node: NodeId) -> Scope<'_> {
        Scope::new(self, node)
    }

    /// Looks up `key` in `node` and then in each ancestor.
    #[must_use]
    pub fn lookup(&self, node: NodeId, key: &str) -> Option<&str> {
        let mut current = self.node(node);
        while let Some(n) = current {
            if let Some(value) = n.entries.get(key) {
                return Some(value);
            }
            current = n.parent.and_then(|parent| self.node(parent));
        }
        None
    }

    /// Localizes `key` within `node`; untranslated keys are returned as-is.
    #[must_use]
    pub fn localize_in<'s>(&'s self, node: NodeId, key: &'s str) -> &'s str {
        self.lookup(node, key).unwrap_or(key)
    }

    /// Localizes `template` within `node`, then substitutes `args` under the catalog's profile.
    ///
    /// # Errors
    /// Returns [`FormatError`] if the resolved template cannot be formatted with `args`.
    pub fn localize_format_in(
        &self,
        node: NodeId,
        template: &str,
        args: &[FormatArg],
    ) -> Result<String, FormatError> {
        crate::format::substitute(self.localize_in(node, template), args, self.language.profile())
    }

    /// `None` for ids from another catalog.
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Child of `parent` named `segment`, created empty if missing.
    fn child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(existing) = self.node(parent).and_then(|n| n.children.get(segment)) {
            return *existing;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: segment.to_string(),
            entries: HashMap::new(),
            children: HashMap::new(),
            parent: Some(parent),
        });
        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            parent_node.children.insert(segment.to_string(), id);
        }
        id
    }

    /// Drops every translation while keeping all contexts, and retargets the catalog.
    pub(crate) fn reset(&mut self, language: LanguageId) {
        for node in &mut self.nodes {
            node.entries.clear();
        }
        self.language = language;
    }

    /// Retargets the catalog, keeping its translations.
    pub(crate) fn set_language(&mut self, language: LanguageId) {
        self.language = language;
    }

    /// Stores a translation, replacing any previous one for the same key.
    pub(crate) fn insert_entry(&mut self, node: NodeId, key: String, value: String) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.entries.insert(key, value);
        }
    }

    /// Own translations of `node`, without inherited ones.
    fn entries_of(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.node(node)
            .into_iter()
            .flat_map(|n| n.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Direct sub-contexts of `node`.
    fn children_of(&self, node: NodeId) -> impl Iterator<Item = (&str, NodeId)> {
        self.node(node)
            .into_iter()
            .flat_map(|n| n.children.iter().map(|(name, id)| (name.as_str(), *id)))
    }

    /// Enclosing context, `None` at the root.
    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Segment id of `node` under its parent.
    fn name_of(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.name.as_str())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(LanguageId::invariant())
    }
}

impl Localize for Catalog {
    fn localize<'s>(&'s self, key: &'s str) -> &'s str {
        self.localize_in(NodeId::ROOT, key)
    }

    fn profile(&self) -> &FormatProfile {
        self.language.profile()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn catalog_with_root_entry() -> Catalog {
        let mut catalog = Catalog::for_tag("fr");
        catalog.insert_entry(NodeId::ROOT, "K".to_string(), "R".to_string());
        catalog
    }

    #[rstest]
    fn untranslated_key_passes_through() {
        let catalog = Catalog::default();

        assert_that!(catalog.localize("missing"), eq("missing"));
    }

    #[rstest]
    fn context_falls_back_to_parent() {
        let mut catalog = catalog_with_root_entry();
        let child = catalog.context("A");

        assert_that!(catalog.localize_in(child, "K"), eq("R"));
    }

    #[googletest::test]
    fn context_entry_shadows_parent() {
        let mut catalog = catalog_with_root_entry();
        let child = catalog.context("A");
        catalog.insert_entry(child, "K".to_string(), "X".to_string());

        expect_that!(catalog.localize_in(child, "K"), eq("X"));
        expect_that!(catalog.localize("K"), eq("R"));
    }

    #[googletest::test]
    fn context_is_created_once() {
        let mut catalog = Catalog::default();

        let first = catalog.context("A.B");
        let second = catalog.context(["A", "B"]);
        let parent = catalog.context("A");

        expect_that!(first, eq(second));
        expect_that!(catalog.context_in(parent, "B"), eq(first));
        expect_that!(catalog.context_count(), eq(3));
    }

    #[rstest]
    fn foreign_node_id_starts_at_root() {
        let mut catalog = Catalog::default();

        let node = catalog.context_in(NodeId(42), "A");

        assert_that!(node, eq(catalog.context("A")));
    }

    #[rstest]
    fn lookup_on_foreign_node_is_none() {
        let catalog = catalog_with_root_entry();

        assert_that!(catalog.lookup(NodeId(42), "K"), none());
    }

    #[googletest::test]
    fn reset_clears_entries_but_keeps_contexts() {
        let mut catalog = catalog_with_root_entry();
        let child = catalog.context("A");
        catalog.insert_entry(child, "K".to_string(), "X".to_string());

        catalog.reset(LanguageId::new("de"));

        expect_that!(catalog.localize_in(child, "K"), eq("K"));
        expect_that!(catalog.context("A"), eq(child));
        expect_that!(catalog.language().full(), eq("de"));
    }

    #[rstest]
    fn localize_format_in_uses_translated_template() {
        let mut catalog = Catalog::for_tag("de");
        catalog.insert_entry(
            NodeId::ROOT,
            "Total: {0:N2}".to_string(),
            "Summe: {0:N2}".to_string(),
        );

        let result = catalog.localize_format_in(NodeId::ROOT, "Total: {0:N2}", &[1234.5.into()]);

        assert_that!(result, ok(eq("Summe: 1.234,50")));
    }
}
