// ABOUTME: HTTP request handlers for tag type operations
// ABOUTME: Project-scoped routes check ownership; global routes resolve tag types by ID

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use super::response::{ApiResult, DeleteResponse, JsonBody};
use atelier_taxonomy::{DbState, TagType, TagTypeInput};

/// List the tag types of a project type
pub async fn list_project_tag_types(
    State(db): State<DbState>,
    Path(project_type_id): Path<String>,
) -> ApiResult<Vec<TagType>> {
    info!("Listing tag types for project type: {}", project_type_id);

    let tag_types = db
        .tag_type_storage
        .list_tag_types(Some(&project_type_id))
        .await?;
    Ok(Json(tag_types))
}

/// Create a tag type under a project type
pub async fn create_project_tag_type(
    State(db): State<DbState>,
    Path(project_type_id): Path<String>,
    JsonBody(input): JsonBody<TagTypeInput>,
) -> ApiResult<TagType> {
    info!(
        "Creating tag type '{}' for project type: {}",
        input.name, project_type_id
    );

    let tag_type = db
        .tag_type_storage
        .create_tag_type(Some(&project_type_id), input)
        .await?;
    Ok(Json(tag_type))
}

pub async fn get_project_tag_type(
    State(db): State<DbState>,
    Path((project_type_id, tag_type_id)): Path<(String, String)>,
) -> ApiResult<TagType> {
    info!("Getting tag type: {}", tag_type_id);

    let tag_type = db
        .tag_type_storage
        .get_scoped_tag_type(&project_type_id, &tag_type_id)
        .await?;
    Ok(Json(tag_type))
}

pub async fn update_project_tag_type(
    State(db): State<DbState>,
    Path((project_type_id, tag_type_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<TagTypeInput>,
) -> ApiResult<TagType> {
    info!("Updating tag type: {}", tag_type_id);

    db.tag_type_storage
        .ensure_in_project_type(&project_type_id, &tag_type_id)
        .await?;
    let tag_type = db
        .tag_type_storage
        .update_tag_type(&tag_type_id, input)
        .await?;
    Ok(Json(tag_type))
}

pub async fn delete_project_tag_type(
    State(db): State<DbState>,
    Path((project_type_id, tag_type_id)): Path<(String, String)>,
) -> ApiResult<DeleteResponse> {
    info!("Deleting tag type: {}", tag_type_id);

    db.tag_type_storage
        .ensure_in_project_type(&project_type_id, &tag_type_id)
        .await?;
    db.tag_type_storage.delete_tag_type(&tag_type_id).await?;
    Ok(DeleteResponse::ok())
}

/// List global (unscoped) tag types
pub async fn list_global_tag_types(State(db): State<DbState>) -> ApiResult<Vec<TagType>> {
    info!("Listing global tag types");

    let tag_types = db.tag_type_storage.list_tag_types(None).await?;
    Ok(Json(tag_types))
}

/// Create a global tag type
pub async fn create_global_tag_type(
    State(db): State<DbState>,
    JsonBody(input): JsonBody<TagTypeInput>,
) -> ApiResult<TagType> {
    info!("Creating global tag type: {}", input.name);

    let tag_type = db.tag_type_storage.create_tag_type(None, input).await?;
    Ok(Json(tag_type))
}

pub async fn get_tag_type(
    State(db): State<DbState>,
    Path(tag_type_id): Path<String>,
) -> ApiResult<TagType> {
    info!("Getting tag type: {}", tag_type_id);

    let tag_type = db.tag_type_storage.get_tag_type(&tag_type_id).await?;
    Ok(Json(tag_type))
}

pub async fn update_tag_type(
    State(db): State<DbState>,
    Path(tag_type_id): Path<String>,
    JsonBody(input): JsonBody<TagTypeInput>,
) -> ApiResult<TagType> {
    info!("Updating tag type: {}", tag_type_id);

    let tag_type = db
        .tag_type_storage
        .update_tag_type(&tag_type_id, input)
        .await?;
    Ok(Json(tag_type))
}

pub async fn delete_tag_type(
    State(db): State<DbState>,
    Path(tag_type_id): Path<String>,
) -> ApiResult<DeleteResponse> {
    info!("Deleting tag type: {}", tag_type_id);

    db.tag_type_storage.delete_tag_type(&tag_type_id).await?;
    Ok(DeleteResponse::ok())
}
