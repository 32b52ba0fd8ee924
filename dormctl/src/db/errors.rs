//! Error classification for the persistence layer.
//!
//! The schema carries a handful of constraints that application code reacts
//! to: the unique room number, the unique settled student, the student
//! foreign keys on settlements and payments, and the positive-capacity
//! check. [`DbError`] folds everything sqlx can raise into variants the API
//! layer can match on; anything it cannot classify is a store fault.

use thiserror::Error;

/// Database failure, classified by what the caller can do about it.
#[derive(Error, Debug)]
pub enum DbError {
    /// No row matched the given identifier
    #[error("row not found")]
    NotFound,

    /// A UNIQUE constraint rejected the write (duplicate room number, or a
    /// second settlement for the same student)
    #[error("unique constraint violated: {message}")]
    UniqueViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// A foreign key rejected the write (the referenced student or room
    /// does not exist)
    #[error("foreign key violated: {message}")]
    ForeignKeyViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// A CHECK constraint rejected the write (non-positive room capacity)
    #[error("check constraint violated: {message}")]
    CheckViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Unclassified store fault, carried with its full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return DbError::NotFound;
        }

        let sqlx::Error::Database(ref db_err) = err else {
            // Pool, protocol, and decode errors are not recoverable here
            return DbError::Other(anyhow::Error::from(err));
        };

        let constraint = db_err.constraint().map(str::to_string);
        let table = db_err.table().map(str::to_string);
        let message = db_err.message().to_string();

        if db_err.is_unique_violation() {
            DbError::UniqueViolation { constraint, table, message }
        } else if db_err.is_foreign_key_violation() {
            DbError::ForeignKeyViolation { constraint, table, message }
        } else if db_err.is_check_violation() {
            DbError::CheckViolation { constraint, table, message }
        } else {
            DbError::Other(anyhow::Error::from(err))
        }
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
