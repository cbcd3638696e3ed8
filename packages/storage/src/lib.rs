// ABOUTME: Data layer plumbing for Atelier
// ABOUTME: SQLite pool setup, embedded migrations, and the shared storage error type

use thiserror::Error;

pub mod pool;

pub use pool::{connect, connect_in_memory, run_migrations, PoolConfig};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(#[from] atelier_core::ValidationError),
    #[error("{0} not found")]
    NotFound(String),
}

impl StorageError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        StorageError::NotFound(resource.into())
    }

    /// Map a write that lost a race with a parent delete to `NotFound`
    pub fn from_write(err: sqlx::Error, parent: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                StorageError::NotFound(parent.to_string())
            }
            _ => StorageError::Sqlx(err),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
