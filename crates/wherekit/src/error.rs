//! Error types for wherekit

use thiserror::Error;

/// Result type alias for wherekit operations
pub type WrapperResult<T> = Result<T, WrapperError>;

/// Problems detected while assembling a condition expression.
///
/// Builders never fail mid-chain: the first problem is recorded and surfaced through
/// [`Wrapper::validate`](crate::Wrapper::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapperError {
    /// A template references `{index}` but fewer values were supplied.
    #[error("Placeholder {{{index}}} has no value ({provided} provided)")]
    PlaceholderOutOfRange { index: usize, provided: usize },

    /// The column resolver rejected a column.
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// Alias is not usable as a bind-variable namespace.
    #[error("Invalid alias '{0}'")]
    InvalidAlias(String),

    /// An empty SQL fragment was given to a method that wraps it in parentheses.
    #[error("Empty SQL fragment passed to {0}")]
    EmptyRawClause(&'static str),

    /// A nested-group closure returned a wrapper other than the one it was given.
    #[error("Nested group returned a detached wrapper")]
    DetachedGroup,

    /// Identifier parse/validation error
    #[error("Invalid identifier: {0}")]
    InvalidIdent(String),

    /// Configuration error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl WrapperError {
    /// Create an invalid column error
    pub fn invalid_column(message: impl Into<String>) -> Self {
        Self::InvalidColumn(message.into())
    }

    /// Create an identifier error
    pub fn invalid_ident(message: impl Into<String>) -> Self {
        Self::InvalidIdent(message.into())
    }

    /// Create a config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Check if this is a placeholder error
    pub fn is_placeholder_out_of_range(&self) -> bool {
        matches!(self, Self::PlaceholderOutOfRange { .. })
    }
}
