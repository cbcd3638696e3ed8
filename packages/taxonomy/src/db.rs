// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the three taxonomy stores

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use crate::project_types::ProjectTypeStorage;
use crate::tag_types::TagTypeStorage;
use crate::tags::TagStorage;
use atelier_storage::{PoolConfig, StorageResult};

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub project_type_storage: Arc<ProjectTypeStorage>,
    pub tag_type_storage: Arc<TagTypeStorage>,
    pub tag_storage: Arc<TagStorage>,
}

impl DbState {
    /// Create new database state from a migrated SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            project_type_storage: Arc::new(ProjectTypeStorage::new(pool.clone())),
            tag_type_storage: Arc::new(TagTypeStorage::new(pool.clone())),
            tag_storage: Arc::new(TagStorage::new(pool.clone())),
            pool,
        }
    }

    /// Open the database at the default location (~/.atelier/atelier.db)
    pub async fn init() -> StorageResult<Self> {
        Self::init_with_path(&atelier_core::database_file(), &PoolConfig::default()).await
    }

    /// Open (and migrate) the database at a custom path
    pub async fn init_with_path(database_path: &Path, config: &PoolConfig) -> StorageResult<Self> {
        let pool = atelier_storage::connect(database_path, config).await?;
        info!("Taxonomy database ready at {}", database_path.display());
        Ok(Self::new(pool))
    }

    /// Fresh in-memory database, used by tests and demos
    pub async fn in_memory() -> StorageResult<Self> {
        let pool = atelier_storage::connect_in_memory().await?;
        Ok(Self::new(pool))
    }
}
