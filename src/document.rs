//! Loading XML translation documents into a [`Catalog`].
//!
//! ```xml
//! <I18N>
//!   <Entry>
//!     <Key>Simple Key 1</Key>
//!     <Value lang="es">Clave simple 1</Value>
//!   </Entry>
//!   <Context id="A.B">
//!     <Entry>...</Entry>
//!   </Context>
//! </I18N>
//! ```

use std::path::Path;

use roxmltree::{
    Document,
    Node,
};

use crate::catalog::{
    Catalog,
    ContextPath,
    NodeId,
};
use crate::error::{
    LoadError,
    StructureError,
    StructureErrorKind,
};
use crate::escape;
use crate::language::{
    LanguageId,
    LanguageMatch,
};
use crate::types::SourcePosition;

/// Root element of a translation document.
pub const ROOT_TAG: &str = "I18N";
/// One source key with its translations.
pub const ENTRY_TAG: &str = "Entry";
/// A named sub-context.
pub const CONTEXT_TAG: &str = "Context";
/// Source text of an entry.
pub const KEY_TAG: &str = "Key";
/// Translation of an entry into one language.
pub const VALUE_TAG: &str = "Value";
/// Language tag of a `Value`.
pub const LANG_ATTRIBUTE: &str = "lang";
/// Segment id of a `Context`.
pub const ID_ATTRIBUTE: &str = "id";

/// Counters reported after a successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Entries that produced a translation for the target language.
    pub translated: usize,
    /// Entries without a value in the target language.
    pub untranslated: usize,
    /// `Context` elements visited.
    pub contexts: usize,
}

/// Walks one parsed document, writing into a catalog.
struct Loader<'c, 'd, 'input> {
    /// Destination of the loaded entries.
    catalog: &'c mut Catalog,
    /// Used to turn node offsets into line numbers.
    document: &'d Document<'input>,
    /// Language whose values are kept.
    language: LanguageId,
    /// Counters so far.
    summary: LoadSummary,
}

impl Catalog {
    /// Parses `text` and loads it, see [`Catalog::load_document`].
    ///
    /// # Errors
    /// - [`LoadError::Syntax`] if `text` is not well-formed XML
    /// - [`LoadError::Structure`] if the document violates the translation schema
    pub fn load_str(
        &mut self,
        text: &str,
        language: Option<LanguageId>,
        merge: bool,
    ) -> Result<LoadSummary, LoadError> {
        let document = Document::parse(text)?;
        self.load_document(&document, language, merge)
    }

    /// Reads a UTF-8 document from disk and loads it, see [`Catalog::load_document`].
    ///
    /// # Errors
    /// - [`LoadError::ResourceNotFound`] if `path` does not exist
    /// - [`LoadError::Io`] if the file cannot be read
    /// - [`LoadError::Syntax`] or [`LoadError::Structure`] as for [`Catalog::load_str`]
    pub fn load_file(
        &mut self,
        path: &Path,
        language: Option<LanguageId>,
        merge: bool,
    ) -> Result<LoadSummary, LoadError> {
        tracing::debug!(path = %path.display(), "Reading translation document");
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::ResourceNotFound { path: path.to_path_buf() }
            } else {
                LoadError::Io(e)
            }
        })?;
        self.load_str(&text, language, merge)
    }

    /// Loads translations for `language` (default: the current language) from a parsed
    /// document.
    ///
    /// Without `merge`, every existing translation is dropped first; contexts are kept, so
    /// previously obtained [`NodeId`]s observe the new data. With `merge`, new translations
    /// overwrite existing ones for the same key and everything else is kept.
    ///
    /// A failed load leaves the translations written before the failing element in place.
    ///
    /// # Errors
    /// Returns [`LoadError::Structure`] if the document violates the translation schema.
    pub fn load_document(
        &mut self,
        document: &Document<'_>,
        language: Option<LanguageId>,
        merge: bool,
    ) -> Result<LoadSummary, LoadError> {
        let language = language.unwrap_or_else(|| self.language().clone());
        tracing::debug!(language = %language, merge, "Loading translation document");

        if merge {
            self.set_language(language.clone());
        } else {
            self.reset(language.clone());
        }

        let mut loader =
            Loader { catalog: self, document, language, summary: LoadSummary::default() };
        loader.load_root()?;

        let summary = loader.summary;
        tracing::debug!(
            translated = summary.translated,
            untranslated = summary.untranslated,
            contexts = summary.contexts,
            "Translation document loaded"
        );
        Ok(summary)
    }
}

impl<'input> Loader<'_, '_, 'input> {
    /// Structure error located at `node`.
    fn error(&self, kind: StructureErrorKind, node: Node<'_, 'input>) -> LoadError {
        StructureError::new(kind, Some(SourcePosition::of_node(self.document, node))).into()
    }

    /// Checks the root element and loads its children into the root context.
    fn load_root(&mut self) -> Result<(), LoadError> {
        let root = self.document.root_element();
        if root.tag_name().name() != ROOT_TAG {
            return Err(self.error(StructureErrorKind::InvalidRoot, root));
        }
        self.load_children(root, NodeId::ROOT)
    }

    /// Loads the `Entry` and `Context` children of `element` into `target`.
    fn load_children(&mut self, element: Node<'_, 'input>, target: NodeId) -> Result<(), LoadError> {
        for child in element.children().filter(Node::is_element) {
            match child.tag_name().name() {
                ENTRY_TAG => self.load_entry(child, target)?,
                CONTEXT_TAG => self.load_context(child, target)?,
                _ => return Err(self.error(StructureErrorKind::InvalidElement, child)),
            }
        }
        Ok(())
    }

    /// Loads a `Context` element as a child of `parent`.
    fn load_context(&mut self, element: Node<'_, 'input>, parent: NodeId) -> Result<(), LoadError> {
        let Some(id) = element.attribute(ID_ATTRIBUTE) else {
            return Err(self.error(StructureErrorKind::MissingId, element));
        };

        let target = self.catalog.context_in(parent, ContextPath::from(id));
        self.summary.contexts += 1;
        self.load_children(element, target)
    }

    /// Validates an `Entry` and stores the value matching the target language, if any.
    fn load_entry(&mut self, element: Node<'_, 'input>, target: NodeId) -> Result<(), LoadError> {
        let mut keys = element.children().filter(|n| n.has_tag_name(KEY_TAG));
        let Some(key_element) = keys.next() else {
            return Err(self.error(StructureErrorKind::MissingKey, element));
        };
        if let Some(extra) = keys.next() {
            return Err(self.error(StructureErrorKind::TooManyKeys, extra));
        }

        let mut full = None;
        let mut primary = None;
        for value in element.children().filter(|n| n.has_tag_name(VALUE_TAG)) {
            let Some(lang) = value.attribute(LANG_ATTRIBUTE) else {
                return Err(self.error(StructureErrorKind::MissingLang, value));
            };
            let slot = match self.language.classify(lang) {
                LanguageMatch::Full => &mut full,
                LanguageMatch::Primary => &mut primary,
                LanguageMatch::NoMatch => continue,
            };
            if slot.replace(value).is_some() {
                return Err(self.error(StructureErrorKind::DuplicateLanguage, value));
            }
        }

        let key = escape::decode(&text_of(key_element));
        match full.or(primary) {
            Some(value) => {
                let value = escape::decode(&text_of(value));
                tracing::trace!(key = %key, value = %value, "Storing translation");
                self.catalog.insert_entry(target, key, value);
                self.summary.translated += 1;
            }
            None => {
                tracing::trace!(key = %key, language = %self.language, "No translation");
                self.summary.untranslated += 1;
            }
        }
        Ok(())
    }
}

/// Concatenated text content of an element, including nested text and CDATA.
fn text_of(element: Node<'_, '_>) -> String {
    element.descendants().filter(Node::is_text).filter_map(|n| n.text()).collect()
}
