//! Error types for craftplan

use thiserror::Error;

use crate::storage::mapper::MappingError;

/// Result type alias using craftplan's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Craftplan error types
#[derive(Error, Debug)]
pub enum Error {
    /// An identifier-keyed operation addressed a row that does not exist.
    /// Raised by the service layer, never by the data-access layer.
    #[error("Project with ID={0} does not exist.")]
    ProjectNotFound(i64),

    /// Any store-level failure: connectivity, constraint violation,
    /// malformed statement. The enclosing transaction has already been
    /// rolled back by the time this propagates.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row-to-entity or parameter conversion failure. Rolls back the
    /// enclosing transaction exactly like a database failure.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Console input that cannot be parsed as the requested type.
    #[error("'{input}' is not a valid {expected}.")]
    InvalidInput {
        input: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
