//! Error types for translation catalog operations

// NOTE: `Display`/`Error`/`From` are implemented by hand rather than via
// `#[derive(thiserror::Error)]` because two variants carry a data field named
// `source`. thiserror unconditionally treats any field named `source` as the
// underlying error source (requiring `std::error::Error`), with no opt-out
// attribute, which does not apply to these `String` payloads. The manual impls
// below reproduce the exact Display strings and source semantics a derive would
// have generated.

/// Errors that can occur while loading or querying translation catalogs
#[derive(Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    InvalidLanguageId(String),

    /// Failed to load a catalog file
    ResourceLoad { path: String },

    /// Malformed TS document
    Parse { line: usize, message: String },

    /// No active translation for a (context, source) pair
    MessageNotFound { context: String, source: String },

    /// Two active entries share the same (context, source) key (strict mode)
    DuplicateMessage { context: String, source: String },

    /// IO error occurred
    Io(std::io::Error),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            I18nError::InvalidLanguageId(id) => {
                write!(f, "Invalid language identifier: {id}")
            }
            I18nError::ResourceLoad { path } => {
                write!(f, "Failed to load catalog file: {path}")
            }
            I18nError::Parse { line, message } => {
                write!(f, "Parse error at line {line}: {message}")
            }
            I18nError::MessageNotFound { context, source } => {
                write!(f, "Message not found: '{source}' in context '{context}'")
            }
            I18nError::DuplicateMessage { context, source } => {
                write!(f, "Duplicate message: '{source}' in context '{context}'")
            }
            I18nError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            I18nError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for I18nError {
    fn from(err: std::io::Error) -> Self {
        I18nError::Io(err)
    }
}

/// Result type for catalog operations
pub type I18nResult<T> = Result<T, I18nError>;
