//! Language settings: the target language and per-language formatting overrides.
//!
//! Reading the settings from disk is left to the embedding application; this module only
//! validates and resolves them.
/// Configuration types and settings
mod types;

pub use types::{
    ConfigError,
    I18nSettings,
    ProfileOverride,
    ValidationError,
};
