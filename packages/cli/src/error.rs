// ABOUTME: Error type for starting and running the server
// ABOUTME: Wraps configuration, storage, and socket failures

use thiserror::Error;

use crate::config::ConfigError;
use atelier_storage::StorageError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
