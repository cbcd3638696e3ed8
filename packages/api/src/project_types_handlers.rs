// ABOUTME: HTTP request handlers for project type operations
// ABOUTME: Responses carry the full project type subtree (tag types and tags)

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use super::response::{ApiResult, DeleteResponse, JsonBody};
use atelier_taxonomy::{DbState, ProjectType, ProjectTypeInput};

/// List all project types with their tag types and tags
pub async fn list_project_types(State(db): State<DbState>) -> ApiResult<Vec<ProjectType>> {
    info!("Listing project types");

    let project_types = db.project_type_storage.list_project_types().await?;
    Ok(Json(project_types))
}

/// Create a project type
pub async fn create_project_type(
    State(db): State<DbState>,
    JsonBody(input): JsonBody<ProjectTypeInput>,
) -> ApiResult<ProjectType> {
    info!("Creating project type: {}", input.name);

    let project_type = db.project_type_storage.create_project_type(input).await?;
    Ok(Json(project_type))
}

/// Get a single project type by ID
pub async fn get_project_type(
    State(db): State<DbState>,
    Path(project_type_id): Path<String>,
) -> ApiResult<ProjectType> {
    info!("Getting project type: {}", project_type_id);

    let project_type = db
        .project_type_storage
        .get_project_type(&project_type_id)
        .await?;
    Ok(Json(project_type))
}

/// Rename a project type
pub async fn update_project_type(
    State(db): State<DbState>,
    Path(project_type_id): Path<String>,
    JsonBody(input): JsonBody<ProjectTypeInput>,
) -> ApiResult<ProjectType> {
    info!("Updating project type: {}", project_type_id);

    let project_type = db
        .project_type_storage
        .update_project_type(&project_type_id, input)
        .await?;
    Ok(Json(project_type))
}

/// Delete a project type with all of its tag types and tags
pub async fn delete_project_type(
    State(db): State<DbState>,
    Path(project_type_id): Path<String>,
) -> ApiResult<DeleteResponse> {
    info!("Deleting project type: {}", project_type_id);

    db.project_type_storage
        .delete_project_type(&project_type_id)
        .await?;
    Ok(DeleteResponse::ok())
}
