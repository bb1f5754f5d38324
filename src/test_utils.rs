//! Shared helpers for unit tests.
#![cfg(test)]

use crate::catalog::Catalog;

/// A small document with one root entry per case: translated in `es` and `fr`, translated
/// only in `de`, and one entry inside a `Menu` context.
pub(crate) const SIMPLE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<I18N>
  <Entry>
    <Key>Simple Key 1</Key>
    <Value lang="es">Clave simple 1</Value>
    <Value lang="fr">Clef simple 1</Value>
  </Entry>
  <Entry>
    <Key>Untranslated</Key>
    <Value lang="de">Unübersetzt</Value>
  </Entry>
  <Context id="Menu">
    <Entry>
      <Key>Open</Key>
      <Value lang="es">Abrir</Value>
      <Value lang="fr">Ouvrir</Value>
    </Entry>
  </Context>
</I18N>
"#;

/// Routes `tracing` output through the test harness; honours `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Loads `document` into a fresh catalog for `tag`.
///
/// # Panics
/// Panics if the document fails to load.
#[allow(clippy::unwrap_used)]
pub(crate) fn catalog_from(document: &str, tag: &str) -> Catalog {
    init_tracing();
    let mut catalog = Catalog::for_tag(tag);
    catalog.load_str(document, None, false).unwrap();
    catalog
}
