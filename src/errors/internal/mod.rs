use thiserror::Error;

pub mod database;
pub mod item;

pub use database::DatabaseError;
pub use item::{ItemError, ValidationError};

/// Internal error type for store and coordinator operations
///
/// Separates infrastructure errors (database, parsing of stored rows) from the
/// item domain errors. Not exposed via API - endpoints convert to `ItemApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl InternalError {
    /// Create a database error with the failing operation name
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.into(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> Self {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> Self {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        InternalError::Item(ItemError::NotFound(id.into()))
    }
}

impl From<ValidationError> for InternalError {
    fn from(err: ValidationError) -> Self {
        InternalError::Item(ItemError::Validation(err))
    }
}
