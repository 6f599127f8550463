//! Error types for sqlforge

use thiserror::Error;

/// Result type alias for query-assembly operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error types for query assembly and execution
#[derive(Debug, Error)]
pub enum QueryError {
    /// Invalid builder input (empty membership list, clause not applicable
    /// to the statement kind)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A clause the statement kind requires is missing
    #[error("Missing required clause: {0}")]
    MissingRequiredClause(String),

    /// Criteria group markers do not balance
    #[error("Unbalanced criteria group: {0}")]
    UnbalancedGroup(String),

    /// Operator/value-shape mismatch in the renderer
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Database error propagated from the executor
    #[error("Database error: {0}")]
    Db(#[from] tokio_postgres::Error),
}

impl QueryError {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a missing-required-clause error
    pub fn missing_clause(message: impl Into<String>) -> Self {
        Self::MissingRequiredClause(message.into())
    }

    /// Create an unbalanced-group error
    pub fn unbalanced(message: impl Into<String>) -> Self {
        Self::UnbalancedGroup(message.into())
    }

    /// Create an unsupported-operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    /// Check if this is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a missing-required-clause error
    pub fn is_missing_clause(&self) -> bool {
        matches!(self, Self::MissingRequiredClause(_))
    }

    /// Check if this is an unbalanced-group error
    pub fn is_unbalanced(&self) -> bool {
        matches!(self, Self::UnbalancedGroup(_))
    }
}
