/// Error types for spreadsheet style and cell store operations.
use thiserror::Error;

/// Result type for spreadsheet style and cell store operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Coarse classification of an [`OoxmlError`].
///
/// Callers that only need to branch on the broad failure category (retry at a
/// higher level, report a missing row, abort on a programming error) match on
/// this instead of the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A row, cell or key is absent.
    NotFound,
    /// A stored key, binary record or XML part failed to parse.
    Malformed,
    /// A write would overwrite existing state.
    Conflict,
    /// The caller broke the current-row / current-cell contract.
    InvariantViolation,
    /// The underlying store failed.
    Backend,
}

/// Error types for spreadsheet style and cell store operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Row or key not present in the store
    #[error("Row not found: {key} ({reason})")]
    NotFound { key: String, reason: String },

    /// Stored record or key could not be decoded
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// Target row index is already occupied
    #[error("Target index for row ({index}) would overwrite a row that already exists")]
    Conflict { index: usize },

    /// A cell other than the row's current cell was written back
    #[error(
        "Attempt to update cell {col} of row {row} that isn't the current cell; \
         use the cell returned by the most recent operation"
    )]
    NotCurrentCell { row: usize, col: usize },

    /// A row other than the sheet's current row was mutated
    #[error(
        "Attempt to update row {row} that isn't the current row; \
         use the row returned by the most recent operation"
    )]
    NotCurrentRow { row: usize },

    /// Backend failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Redis client error
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

impl OoxmlError {
    /// Build a [`OoxmlError::NotFound`] for a row key.
    pub fn row_not_found(key: impl Into<String>, reason: impl Into<String>) -> Self {
        OoxmlError::NotFound {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OoxmlError::NotFound { .. } => ErrorKind::NotFound,
            OoxmlError::Malformed(_) | OoxmlError::Xml(_) | OoxmlError::Config(_) => {
                ErrorKind::Malformed
            },
            OoxmlError::Conflict { .. } => ErrorKind::Conflict,
            OoxmlError::NotCurrentCell { .. } | OoxmlError::NotCurrentRow { .. } => {
                ErrorKind::InvariantViolation
            },
            OoxmlError::Backend(_) | OoxmlError::Io(_) => ErrorKind::Backend,
            #[cfg(feature = "redis")]
            OoxmlError::Redis(_) => ErrorKind::Backend,
        }
    }

    /// True for caller bugs that break the current-row / current-cell contract.
    ///
    /// These are never produced by backend failures, so an embedding
    /// application can treat them as fatal.
    #[inline]
    pub fn is_invariant_violation(&self) -> bool {
        self.kind() == ErrorKind::InvariantViolation
    }
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<crate::common::binary::BinaryError> for OoxmlError {
    fn from(err: crate::common::binary::BinaryError) -> Self {
        OoxmlError::Malformed(err.to_string())
    }
}
