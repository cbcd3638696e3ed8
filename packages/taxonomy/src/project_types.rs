// ABOUTME: Project type storage layer using SQLite
// ABOUTME: Project types are returned with two levels of eager loading

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::queries::{self, row_exists, row_to_project_type, PROJECT_TYPE_EXISTS};
use crate::types::{ProjectType, ProjectTypeInput};
use atelier_core::{generate_id, validate_name, EntityKind};
use atelier_storage::{StorageError, StorageResult};

pub struct ProjectTypeStorage {
    pool: SqlitePool,
}

impl ProjectTypeStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all project types with their tag types and tags
    pub async fn list_project_types(&self) -> StorageResult<Vec<ProjectType>> {
        debug!("Listing project types");

        let rows = sqlx::query("SELECT * FROM project_types ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        let project_types = rows
            .iter()
            .map(row_to_project_type)
            .collect::<Result<Vec<_>, _>>()?;

        queries::attach_tag_types(&self.pool, project_types).await
    }

    pub async fn get_project_type(&self, project_type_id: &str) -> StorageResult<ProjectType> {
        debug!("Fetching project type: {}", project_type_id);
        queries::load_project_type(&self.pool, project_type_id).await
    }

    pub async fn create_project_type(&self, input: ProjectTypeInput) -> StorageResult<ProjectType> {
        let name = validate_name(EntityKind::ProjectType, &input.name)?;
        let project_type_id = generate_id("pt");
        let now = Utc::now();

        debug!("Creating project type: {} (name: {})", project_type_id, name);

        sqlx::query(
            r#"
            INSERT INTO project_types (id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&project_type_id)
        .bind(&name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        queries::load_project_type(&self.pool, &project_type_id).await
    }

    /// Rename a project type. Its tag types are returned unchanged.
    pub async fn update_project_type(
        &self,
        project_type_id: &str,
        input: ProjectTypeInput,
    ) -> StorageResult<ProjectType> {
        let name = validate_name(EntityKind::ProjectType, &input.name)?;

        debug!("Updating project type: {}", project_type_id);

        let result = sqlx::query("UPDATE project_types SET name = ?, updated_at = ? WHERE id = ?")
            .bind(&name)
            .bind(Utc::now())
            .bind(project_type_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Project type"));
        }

        queries::load_project_type(&self.pool, project_type_id).await
    }

    /// Delete a project type, its tag types, and their tags in one transaction
    pub async fn delete_project_type(&self, project_type_id: &str) -> StorageResult<()> {
        debug!("Deleting project type: {}", project_type_id);

        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, PROJECT_TYPE_EXISTS, project_type_id).await? {
            return Err(StorageError::not_found("Project type"));
        }

        let tags = sqlx::query(
            "DELETE FROM tags WHERE tag_type_id IN (SELECT id FROM tag_types WHERE project_type_id = ?)",
        )
        .bind(project_type_id)
        .execute(&mut *tx)
        .await?;

        let tag_types = sqlx::query("DELETE FROM tag_types WHERE project_type_id = ?")
            .bind(project_type_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM project_types WHERE id = ?")
            .bind(project_type_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            "Deleted project type {} with {} tag type(s) and {} tag(s)",
            project_type_id,
            tag_types.rows_affected(),
            tags.rows_affected()
        );
        Ok(())
    }
}
