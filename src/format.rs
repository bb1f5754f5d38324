//! Culture-aware positional formatting.
/// Format errors
mod error;
/// Formatting profiles
mod profile;
/// Placeholder substitution
mod template;
/// Format arguments
mod value;

pub use error::FormatError;
pub use profile::FormatProfile;
pub use template::{
    MAX_ALIGNMENT,
    substitute,
};
pub use value::FormatArg;
