// ABOUTME: Tag type storage layer using SQLite
// ABOUTME: Tag types are scoped to a project type or global; deletes cascade to tags

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::queries::{self, row_exists, row_to_tag_type, PROJECT_TYPE_EXISTS, TAG_TYPE_EXISTS};
use crate::types::{TagType, TagTypeInput};
use atelier_core::{generate_id, validate_color, validate_name, EntityKind};
use atelier_storage::{StorageError, StorageResult};

pub struct TagTypeStorage {
    pool: SqlitePool,
}

impl TagTypeStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List tag types with their tags, in creation order.
    ///
    /// `Some(id)` lists the tag types of that project type; `None` lists the
    /// global tag types.
    pub async fn list_tag_types(&self, project_type_id: Option<&str>) -> StorageResult<Vec<TagType>> {
        debug!("Listing tag types (project type: {:?})", project_type_id);

        let rows = match project_type_id {
            Some(project_type_id) => {
                if !row_exists(&self.pool, PROJECT_TYPE_EXISTS, project_type_id).await? {
                    return Err(StorageError::not_found("Project type"));
                }
                sqlx::query("SELECT * FROM tag_types WHERE project_type_id = ? ORDER BY rowid")
                    .bind(project_type_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT * FROM tag_types WHERE project_type_id IS NULL ORDER BY rowid")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let tag_types = rows
            .iter()
            .map(row_to_tag_type)
            .collect::<Result<Vec<_>, _>>()?;

        queries::attach_tags(&self.pool, tag_types).await
    }

    /// Get a tag type with its tags, regardless of scope
    pub async fn get_tag_type(&self, tag_type_id: &str) -> StorageResult<TagType> {
        debug!("Fetching tag type: {}", tag_type_id);
        queries::load_tag_type(&self.pool, tag_type_id).await
    }

    /// Get a tag type only if it belongs to `project_type_id`
    pub async fn get_scoped_tag_type(
        &self,
        project_type_id: &str,
        tag_type_id: &str,
    ) -> StorageResult<TagType> {
        self.ensure_in_project_type(project_type_id, tag_type_id)
            .await?;
        queries::load_tag_type(&self.pool, tag_type_id).await
    }

    /// `NotFound` unless the project type exists and owns the tag type.
    ///
    /// Scoped routes call this before the mutation, outside its transaction.
    /// A tag type deleted in between still surfaces as `NotFound`, since every
    /// mutation re-checks its target row when it runs.
    pub async fn ensure_in_project_type(
        &self,
        project_type_id: &str,
        tag_type_id: &str,
    ) -> StorageResult<()> {
        if !row_exists(&self.pool, PROJECT_TYPE_EXISTS, project_type_id).await? {
            return Err(StorageError::not_found("Project type"));
        }

        let owned: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM tag_types WHERE id = ? AND project_type_id = ?)",
        )
        .bind(tag_type_id)
        .bind(project_type_id)
        .fetch_one(&self.pool)
        .await?;

        if owned == 0 {
            return Err(StorageError::not_found("Tag type"));
        }
        Ok(())
    }

    /// Create a tag type, optionally under a project type
    pub async fn create_tag_type(
        &self,
        project_type_id: Option<&str>,
        input: TagTypeInput,
    ) -> StorageResult<TagType> {
        let name = validate_name(EntityKind::TagType, &input.name)?;
        let color = validate_color(EntityKind::TagType, &input.color)?;

        let tag_type_id = generate_id("tt");
        let now = Utc::now();

        debug!(
            "Creating tag type: {} (name: {}, project type: {:?})",
            tag_type_id, name, project_type_id
        );

        let mut tx = self.pool.begin().await?;

        if let Some(project_type_id) = project_type_id {
            if !row_exists(&mut *tx, PROJECT_TYPE_EXISTS, project_type_id).await? {
                return Err(StorageError::not_found("Project type"));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO tag_types (id, name, color, project_type_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&tag_type_id)
        .bind(&name)
        .bind(&color)
        .bind(project_type_id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from_write(e, "Project type"))?;

        tx.commit().await?;

        queries::load_tag_type(&self.pool, &tag_type_id).await
    }

    /// Replace a tag type's name and color. Its tags are untouched.
    pub async fn update_tag_type(
        &self,
        tag_type_id: &str,
        input: TagTypeInput,
    ) -> StorageResult<TagType> {
        let name = validate_name(EntityKind::TagType, &input.name)?;
        let color = validate_color(EntityKind::TagType, &input.color)?;

        debug!("Updating tag type: {}", tag_type_id);

        let result =
            sqlx::query("UPDATE tag_types SET name = ?, color = ?, updated_at = ? WHERE id = ?")
                .bind(&name)
                .bind(&color)
                .bind(Utc::now())
                .bind(tag_type_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Tag type"));
        }

        queries::load_tag_type(&self.pool, tag_type_id).await
    }

    /// Delete a tag type and all of its tags in one transaction
    pub async fn delete_tag_type(&self, tag_type_id: &str) -> StorageResult<()> {
        debug!("Deleting tag type: {}", tag_type_id);

        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, TAG_TYPE_EXISTS, tag_type_id).await? {
            return Err(StorageError::not_found("Tag type"));
        }

        let tags = sqlx::query("DELETE FROM tags WHERE tag_type_id = ?")
            .bind(tag_type_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM tag_types WHERE id = ?")
            .bind(tag_type_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            "Deleted tag type {} and {} tag(s)",
            tag_type_id,
            tags.rows_affected()
        );
        Ok(())
    }
}
