// ABOUTME: HTTP request handlers for tag operations
// ABOUTME: Mutations answer with the parent tag type so clients replace it wholesale

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use super::response::{ApiResult, JsonBody};
use atelier_taxonomy::{DbState, Tag, TagInput, TagType};

/// Create a tag under a project-scoped tag type
pub async fn create_project_tag(
    State(db): State<DbState>,
    Path((project_type_id, tag_type_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<TagInput>,
) -> ApiResult<TagType> {
    db.tag_type_storage
        .ensure_in_project_type(&project_type_id, &tag_type_id)
        .await?;
    create_tag(State(db), Path(tag_type_id), JsonBody(input)).await
}

pub async fn get_project_tag(
    State(db): State<DbState>,
    Path((project_type_id, tag_type_id, tag_id)): Path<(String, String, String)>,
) -> ApiResult<Tag> {
    db.tag_type_storage
        .ensure_in_project_type(&project_type_id, &tag_type_id)
        .await?;
    get_tag(State(db), Path((tag_type_id, tag_id))).await
}

pub async fn update_project_tag(
    State(db): State<DbState>,
    Path((project_type_id, tag_type_id, tag_id)): Path<(String, String, String)>,
    JsonBody(input): JsonBody<TagInput>,
) -> ApiResult<TagType> {
    db.tag_type_storage
        .ensure_in_project_type(&project_type_id, &tag_type_id)
        .await?;
    update_tag(State(db), Path((tag_type_id, tag_id)), JsonBody(input)).await
}

pub async fn delete_project_tag(
    State(db): State<DbState>,
    Path((project_type_id, tag_type_id, tag_id)): Path<(String, String, String)>,
) -> ApiResult<TagType> {
    db.tag_type_storage
        .ensure_in_project_type(&project_type_id, &tag_type_id)
        .await?;
    delete_tag(State(db), Path((tag_type_id, tag_id))).await
}

/// Create a tag under any tag type
pub async fn create_tag(
    State(db): State<DbState>,
    Path(tag_type_id): Path<String>,
    JsonBody(input): JsonBody<TagInput>,
) -> ApiResult<TagType> {
    info!("Creating tag '{}' in tag type: {}", input.name, tag_type_id);

    let tag_type = db.tag_storage.create_tag(&tag_type_id, input).await?;
    Ok(Json(tag_type))
}

pub async fn get_tag(
    State(db): State<DbState>,
    Path((tag_type_id, tag_id)): Path<(String, String)>,
) -> ApiResult<Tag> {
    info!("Getting tag: {}", tag_id);

    let tag = db.tag_storage.get_tag(&tag_type_id, &tag_id).await?;
    Ok(Json(tag))
}

pub async fn update_tag(
    State(db): State<DbState>,
    Path((tag_type_id, tag_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<TagInput>,
) -> ApiResult<TagType> {
    info!("Updating tag: {}", tag_id);

    let tag_type = db
        .tag_storage
        .update_tag(&tag_type_id, &tag_id, input)
        .await?;
    Ok(Json(tag_type))
}

pub async fn delete_tag(
    State(db): State<DbState>,
    Path((tag_type_id, tag_id)): Path<(String, String)>,
) -> ApiResult<TagType> {
    info!("Deleting tag: {}", tag_id);

    let tag_type = db.tag_storage.delete_tag(&tag_type_id, &tag_id).await?;
    Ok(Json(tag_type))
}
