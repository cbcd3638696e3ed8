// ABOUTME: Row mapping and eager loading shared by the taxonomy stores
// ABOUTME: Builds subtrees with one query per level instead of one per row

use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, QueryBuilder, Row, Sqlite, SqlitePool};

use crate::types::{ProjectType, Tag, TagType};
use atelier_storage::{StorageError, StorageResult};

pub(crate) const PROJECT_TYPE_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM project_types WHERE id = ?)";
pub(crate) const TAG_TYPE_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM tag_types WHERE id = ?)";

pub(crate) async fn row_exists<'e, E>(executor: E, sql: &'static str, id: &str) -> StorageResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 = sqlx::query_scalar(sql).bind(id).fetch_one(executor).await?;
    Ok(found != 0)
}

pub(crate) fn row_to_project_type(row: &SqliteRow) -> StorageResult<ProjectType> {
    Ok(ProjectType {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        tag_types: Vec::new(),
    })
}

pub(crate) fn row_to_tag_type(row: &SqliteRow) -> StorageResult<TagType> {
    Ok(TagType {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        color: row.try_get("color")?,
        project_type_id: row.try_get("project_type_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        tags: Vec::new(),
    })
}

pub(crate) fn row_to_tag(row: &SqliteRow) -> StorageResult<Tag> {
    Ok(Tag {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        color: row.try_get("color")?,
        tag_type_id: row.try_get("tag_type_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Tags for the given tag types, grouped by parent, in creation order
async fn fetch_tags_by_tag_type(
    pool: &SqlitePool,
    tag_type_ids: &[String],
) -> StorageResult<HashMap<String, Vec<Tag>>> {
    let mut grouped: HashMap<String, Vec<Tag>> = HashMap::new();
    if tag_type_ids.is_empty() {
        return Ok(grouped);
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT * FROM tags WHERE tag_type_id IN (");
    let mut separated = builder.separated(", ");
    for id in tag_type_ids {
        separated.push_bind(id.clone());
    }
    // rowid follows insertion order
    separated.push_unseparated(") ORDER BY rowid");

    let rows = builder.build().fetch_all(pool).await?;
    for row in &rows {
        let tag = row_to_tag(row)?;
        grouped.entry(tag.tag_type_id.clone()).or_default().push(tag);
    }
    Ok(grouped)
}

/// Fill in `tags` for each tag type
pub(crate) async fn attach_tags(
    pool: &SqlitePool,
    mut tag_types: Vec<TagType>,
) -> StorageResult<Vec<TagType>> {
    let ids: Vec<String> = tag_types.iter().map(|t| t.id.clone()).collect();
    let mut tags = fetch_tags_by_tag_type(pool, &ids).await?;
    for tag_type in &mut tag_types {
        tag_type.tags = tags.remove(&tag_type.id).unwrap_or_default();
    }
    Ok(tag_types)
}

/// Fill in `tag_types` (with their tags) for each project type
pub(crate) async fn attach_tag_types(
    pool: &SqlitePool,
    mut project_types: Vec<ProjectType>,
) -> StorageResult<Vec<ProjectType>> {
    if project_types.is_empty() {
        return Ok(project_types);
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT * FROM tag_types WHERE project_type_id IN (");
    let mut separated = builder.separated(", ");
    for project_type in &project_types {
        separated.push_bind(project_type.id.clone());
    }
    separated.push_unseparated(") ORDER BY rowid");

    let rows = builder.build().fetch_all(pool).await?;
    let tag_types = rows
        .iter()
        .map(row_to_tag_type)
        .collect::<Result<Vec<_>, _>>()?;
    let tag_types = attach_tags(pool, tag_types).await?;

    let mut grouped: HashMap<String, Vec<TagType>> = HashMap::new();
    for tag_type in tag_types {
        if let Some(parent) = tag_type.project_type_id.clone() {
            grouped.entry(parent).or_default().push(tag_type);
        }
    }
    for project_type in &mut project_types {
        project_type.tag_types = grouped.remove(&project_type.id).unwrap_or_default();
    }
    Ok(project_types)
}

/// One tag type with its tags
pub(crate) async fn load_tag_type(pool: &SqlitePool, tag_type_id: &str) -> StorageResult<TagType> {
    let row = sqlx::query("SELECT * FROM tag_types WHERE id = ?")
        .bind(tag_type_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StorageError::not_found("Tag type"))?;

    let tag_type = row_to_tag_type(&row)?;
    let mut loaded = attach_tags(pool, vec![tag_type]).await?;
    loaded
        .pop()
        .ok_or_else(|| StorageError::not_found("Tag type"))
}

/// One project type with its tag types and their tags
pub(crate) async fn load_project_type(
    pool: &SqlitePool,
    project_type_id: &str,
) -> StorageResult<ProjectType> {
    let row = sqlx::query("SELECT * FROM project_types WHERE id = ?")
        .bind(project_type_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StorageError::not_found("Project type"))?;

    let project_type = row_to_project_type(&row)?;
    let mut loaded = attach_tag_types(pool, vec![project_type]).await?;
    loaded
        .pop()
        .ok_or_else(|| StorageError::not_found("Project type"))
}
