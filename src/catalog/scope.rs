//! Read-only view of one context.

use super::{
    Catalog,
    NodeId,
};
use crate::format::FormatProfile;
use crate::localize::Localize;

/// A borrowed view of one context of a [`Catalog`].
///
/// Lookups fall back through the ancestors of the context up to the root.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'c> {
    /// Catalog the context belongs to.
    catalog: &'c Catalog,
    /// The viewed context.
    node: NodeId,
}

impl<'c> Scope<'c> {
    /// View of `node` in `catalog`.
    pub(super) const fn new(catalog: &'c Catalog, node: NodeId) -> Self {
        Self { catalog, node }
    }

    /// Handle of the viewed context.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.node
    }

    /// The enclosing context, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.catalog.parent_of(self.node).map(|parent| Self::new(self.catalog, parent))
    }

    /// Segment ids from the root down to this context (empty for the root).
    #[must_use]
    pub fn path(&self) -> Vec<&'c str> {
        let mut segments = Vec::new();
        let mut current = Some(*self);
        while let Some(scope) = current {
            current = scope.parent();
            if current.is_some()
                && let Some(name) = scope.catalog.name_of(scope.node)
            {
                segments.push(name);
            }
        }
        segments.reverse();
        segments
    }

    /// Translations defined directly in this context, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&'c str, &'c str)> + use<'c> {
        self.catalog.entries_of(self.node)
    }

    /// Ids of the direct sub-contexts, sorted.
    #[must_use]
    pub fn child_ids(&self) -> Vec<&'c str> {
        let mut ids: Vec<&str> =
            self.catalog.children_of(self.node).map(|(name, _)| name).collect();
        ids.sort_unstable();
        ids
    }

    /// An existing direct sub-context, without creating it.
    #[must_use]
    pub fn child(&self, id: &str) -> Option<Self> {
        self.catalog
            .children_of(self.node)
            .find(|(name, _)| *name == id)
            .map(|(_, child)| Self::new(self.catalog, child))
    }
}

impl Localize for Scope<'_> {
    fn localize<'s>(&'s self, key: &'s str) -> &'s str {
        self.catalog.localize_in(self.node, key)
    }

    fn profile(&self) -> &FormatProfile {
        self.catalog.language().profile()
    }
}
