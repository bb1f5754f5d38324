//! context-i18n
//!
//! Runtime string translation with hierarchical contexts, language fallback and
//! culture-aware formatting, loaded from XML translation documents.
//!
//! ```
//! use context_i18n::{Catalog, LanguageId, Localize};
//!
//! let document = r#"<I18N>
//!   <Entry>
//!     <Key>Simple Key 1</Key>
//!     <Value lang="es">Clave simple 1</Value>
//!   </Entry>
//! </I18N>"#;
//!
//! let mut catalog = Catalog::new(LanguageId::new("es-AR"));
//! catalog.load_str(document, None, false)?;
//! assert_eq!(catalog.localize("Simple Key 1"), "Clave simple 1");
//! assert_eq!(catalog.localize("Missing"), "Missing");
//! # Ok::<(), context_i18n::LoadError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod escape;
pub mod format;
pub mod language;
pub mod localize;
pub mod types;

mod test_utils;

pub use catalog::{
    Catalog,
    ContextPath,
    NodeId,
    Scope,
};
pub use document::LoadSummary;
pub use error::{
    LoadError,
    StructureError,
    StructureErrorKind,
};
pub use format::{
    FormatArg,
    FormatError,
    FormatProfile,
};
pub use language::{
    LanguageId,
    LanguageMatch,
};
pub use localize::{
    Localize,
    Lookup,
};
