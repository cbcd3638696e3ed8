// ABOUTME: Tag storage layer using SQLite
// ABOUTME: Every mutation returns the parent tag type with its refreshed tag list

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::queries::{self, row_exists, row_to_tag, TAG_TYPE_EXISTS};
use crate::types::{Tag, TagInput, TagType};
use atelier_core::{generate_id, normalize_optional_color, validate_name, EntityKind};
use atelier_storage::{StorageError, StorageResult};

pub struct TagStorage {
    pool: SqlitePool,
}

impl TagStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List the tags of a tag type in creation order
    pub async fn list_tags(&self, tag_type_id: &str) -> StorageResult<Vec<Tag>> {
        debug!("Listing tags for tag type: {}", tag_type_id);

        let tag_type = queries::load_tag_type(&self.pool, tag_type_id).await?;
        Ok(tag_type.tags)
    }

    /// Get a single tag, which must belong to `tag_type_id`
    pub async fn get_tag(&self, tag_type_id: &str, tag_id: &str) -> StorageResult<Tag> {
        debug!("Fetching tag: {} (tag type: {})", tag_id, tag_type_id);

        let row = sqlx::query("SELECT * FROM tags WHERE id = ? AND tag_type_id = ?")
            .bind(tag_id)
            .bind(tag_type_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("Tag"))?;

        row_to_tag(&row)
    }

    /// Create a tag under an existing tag type
    pub async fn create_tag(&self, tag_type_id: &str, input: TagInput) -> StorageResult<TagType> {
        let name = validate_name(EntityKind::Tag, &input.name)?;
        let color = normalize_optional_color(input.color.as_deref())?;

        let tag_id = generate_id("tag");
        let now = Utc::now();

        debug!("Creating tag: {} (name: {}, tag type: {})", tag_id, name, tag_type_id);

        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, TAG_TYPE_EXISTS, tag_type_id).await? {
            return Err(StorageError::not_found("Tag type"));
        }

        sqlx::query(
            r#"
            INSERT INTO tags (id, name, color, tag_type_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&tag_id)
        .bind(&name)
        .bind(&color)
        .bind(tag_type_id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from_write(e, "Tag type"))?;

        tx.commit().await?;

        queries::load_tag_type(&self.pool, tag_type_id).await
    }

    /// Replace a tag's name and color override
    pub async fn update_tag(
        &self,
        tag_type_id: &str,
        tag_id: &str,
        input: TagInput,
    ) -> StorageResult<TagType> {
        let name = validate_name(EntityKind::Tag, &input.name)?;
        let color = normalize_optional_color(input.color.as_deref())?;

        debug!("Updating tag: {} (tag type: {})", tag_id, tag_type_id);

        let result = sqlx::query(
            "UPDATE tags SET name = ?, color = ?, updated_at = ? WHERE id = ? AND tag_type_id = ?",
        )
        .bind(&name)
        .bind(&color)
        .bind(Utc::now())
        .bind(tag_id)
        .bind(tag_type_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Tag"));
        }

        queries::load_tag_type(&self.pool, tag_type_id).await
    }

    /// Delete a tag. Deleting a missing tag is `NotFound`, not a no-op.
    pub async fn delete_tag(&self, tag_type_id: &str, tag_id: &str) -> StorageResult<TagType> {
        debug!("Deleting tag: {} (tag type: {})", tag_id, tag_type_id);

        let result = sqlx::query("DELETE FROM tags WHERE id = ? AND tag_type_id = ?")
            .bind(tag_id)
            .bind(tag_type_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Tag"));
        }

        queries::load_tag_type(&self.pool, tag_type_id).await
    }
}
