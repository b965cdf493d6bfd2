//! Repository Module
//!
//! CRUD operations over the SQLite schema. Repositories are free async
//! functions over `&SqlitePool`; multi-row writes open a transaction.

// Accounts
pub mod address;
pub mod loyalty;
pub mod user;

// Catalog
pub mod branch;
pub mod category;
pub mod menu_item;
pub mod restaurant;

// Ordering
pub mod offer;
pub mod order;

// Fulfilment
pub mod delivery;

// Social
pub mod favorite;
pub mod review;

use shared::error::ErrorCode;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{1}")]
    Business(ErrorCode, String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// Typed business error with the code's default message
    pub fn business(code: ErrorCode) -> Self {
        RepoError::Business(code, code.message().to_string())
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
