use thiserror::Error;

/// Errors raised while substituting placeholders into a template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A placeholder refers to an argument that was not supplied
    #[error("Placeholder index {index} is out of range ({count} arguments supplied)")]
    ArgumentIndexOutOfRange { index: usize, count: usize },
    /// A brace or placeholder at the given byte offset is malformed
    #[error("Invalid placeholder at offset {position}")]
    InvalidPlaceholder { position: usize },
    /// A format spec cannot be applied to the argument it is attached to
    #[error("Invalid format spec '{spec}' for {kind} argument")]
    InvalidFormatSpec { spec: String, kind: &'static str },
}
