//! Error types for rdbql

use thiserror::Error;

/// Result type alias for builder and render operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while building or rendering a statement tree.
///
/// Every variant is a usage error in how the tree was built. Nothing here is
/// transient: retrying the same call yields the same error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SqlError {
    /// A template's `?` count does not match its interpolation arguments
    #[error("Malformed template: {placeholders} placeholder(s) but {args} argument(s)")]
    MalformedTemplate { placeholders: usize, args: usize },

    /// An insert row is neither positional nor keyed
    #[error("Invalid row shape: expected an array or an object, got {0}")]
    InvalidRowShape(String),

    /// Positional and keyed rows mixed without explicit columns
    #[error(
        "Ambiguous column mapping for '{table}': positional and keyed rows require explicit columns()"
    )]
    AmbiguousColumnMapping { table: String },

    /// `List::union` operand that is not a list
    #[error("Invalid union operand: expected a list or an array literal, got {0}")]
    InvalidUnionOperand(String),

    /// INSERT without any row
    #[error("INSERT INTO '{table}' has no rows")]
    EmptyInsert { table: String },

    /// UNION without any member SELECT
    #[error("UNION has no member selects")]
    EmptyUnion,

    /// UPDATE without any assignment
    #[error("UPDATE '{table}' has no assignments")]
    EmptyUpdate { table: String },

    /// A statement from another dialect family was embedded in the tree
    #[error("Dialect mismatch: rendering with '{expected}' but node belongs to '{found}'")]
    DialectMismatch { expected: String, found: String },

    /// A dialect with this name is already registered
    #[error("Dialect already registered: {0}")]
    DialectExists(String),

    /// Identifier failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdent(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SqlError {
    /// Create an identifier validation error
    pub fn invalid_ident(message: impl Into<String>) -> Self {
        Self::InvalidIdent(message.into())
    }

    /// Create an invalid row shape error describing the offending input
    pub fn invalid_row_shape(found: impl Into<String>) -> Self {
        Self::InvalidRowShape(found.into())
    }

    /// Check if this is a malformed template error
    pub fn is_malformed_template(&self) -> bool {
        matches!(self, Self::MalformedTemplate { .. })
    }

    /// Check if this is an ambiguous column mapping error
    pub fn is_ambiguous_columns(&self) -> bool {
        matches!(self, Self::AmbiguousColumnMapping { .. })
    }

    /// Check if this is a dialect mismatch error
    pub fn is_dialect_mismatch(&self) -> bool {
        matches!(self, Self::DialectMismatch { .. })
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
