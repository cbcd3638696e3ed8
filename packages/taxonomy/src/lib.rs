// ABOUTME: Taxonomy management for the Atelier dashboard
// ABOUTME: Project types own tag types, tag types own tags; stores return whole subtrees

pub mod db;
pub mod project_types;
mod queries;
pub mod tag_types;
pub mod tags;
pub mod types;

// Re-export main types
pub use db::DbState;
pub use project_types::ProjectTypeStorage;
pub use tag_types::TagTypeStorage;
pub use tags::TagStorage;
pub use types::{effective_color, ProjectType, ProjectTypeInput, Tag, TagInput, TagType, TagTypeInput};

pub use atelier_storage::{StorageError, StorageResult};
