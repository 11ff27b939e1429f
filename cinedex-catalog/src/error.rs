use thiserror::Error;

/// Errors raised while deriving a signature from a file path.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The path contains a malformed percent-escape or decodes to invalid UTF-8.
    #[error("Path could not be URL-decoded: {0}")]
    Decode(String),

    /// No recognizable structure was found.
    #[error("No {0} found in path")]
    PatternMismatch(String),

    /// A localized season phrase matched but has no numeric mapping.
    #[error("Season phrase '{0}' has no numeric mapping")]
    NumeralUnresolved(String),

    /// A captured number could not be parsed as a base-10 integer.
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    /// The absolute form of the path could not be resolved.
    #[error("Could not resolve path: {0}")]
    Path(#[from] std::io::Error),
}

impl ExtractError {
    pub fn pattern_mismatch(what: impl Into<String>) -> Self {
        Self::PatternMismatch(what.into())
    }
}
