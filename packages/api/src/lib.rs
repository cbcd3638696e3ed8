// ABOUTME: HTTP API layer for the Atelier taxonomy providing REST endpoints and routing
// ABOUTME: Integration layer between axum and the taxonomy stores

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use atelier_taxonomy::DbState;

pub mod colors_handlers;
pub mod project_types_handlers;
pub mod response;
pub mod tag_types_handlers;
pub mod tags_handlers;

pub use response::{ApiError, ApiResult, DeleteResponse, ErrorResponse, JsonBody};

/// Creates the project types router, including the project-scoped tag type and tag routes
pub fn create_project_types_router() -> Router<DbState> {
    Router::new()
        .route(
            "/project-types",
            get(project_types_handlers::list_project_types)
                .post(project_types_handlers::create_project_type),
        )
        .route(
            "/project-types/{id}",
            get(project_types_handlers::get_project_type)
                .put(project_types_handlers::update_project_type)
                .delete(project_types_handlers::delete_project_type),
        )
        .route(
            "/project-types/{id}/tag-types",
            get(tag_types_handlers::list_project_tag_types)
                .post(tag_types_handlers::create_project_tag_type),
        )
        .route(
            "/project-types/{id}/tag-types/{tag_type_id}",
            get(tag_types_handlers::get_project_tag_type)
                .put(tag_types_handlers::update_project_tag_type)
                .delete(tag_types_handlers::delete_project_tag_type),
        )
        .route(
            "/project-types/{id}/tag-types/{tag_type_id}/tags",
            post(tags_handlers::create_project_tag),
        )
        .route(
            "/project-types/{id}/tag-types/{tag_type_id}/tags/{tag_id}",
            get(tags_handlers::get_project_tag)
                .put(tags_handlers::update_project_tag)
                .delete(tags_handlers::delete_project_tag),
        )
}

/// Creates the global tag types router
pub fn create_tag_types_router() -> Router<DbState> {
    Router::new()
        .route(
            "/tag-types",
            get(tag_types_handlers::list_global_tag_types)
                .post(tag_types_handlers::create_global_tag_type),
        )
        .route(
            "/tag-types/{id}",
            get(tag_types_handlers::get_tag_type)
                .put(tag_types_handlers::update_tag_type)
                .delete(tag_types_handlers::delete_tag_type),
        )
        .route("/tag-types/{id}/tags", post(tags_handlers::create_tag))
        .route(
            "/tag-types/{id}/tags/{tag_id}",
            get(tags_handlers::get_tag)
                .put(tags_handlers::update_tag)
                .delete(tags_handlers::delete_tag),
        )
}

/// Creates the color utility router
pub fn create_colors_router() -> Router<DbState> {
    Router::new().route("/colors/{hex}", get(colors_handlers::describe_color))
}

/// Full taxonomy API mounted under `/api`, with state applied
pub fn create_api_router(db: DbState) -> Router {
    let api = Router::new()
        .merge(create_project_types_router())
        .merge(create_tag_types_router())
        .merge(create_colors_router());

    Router::new()
        .nest("/api", api)
        .layer(CatchPanicLayer::custom(response::handle_panic))
        .with_state(db)
}
