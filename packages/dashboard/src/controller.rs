// ABOUTME: Taxonomy manager controller coordinating the API, cache, and list state
// ABOUTME: No optimistic updates: state changes only after the server answers

use thiserror::Error;
use tracing::{debug, error, info};

use atelier_core::{normalize_optional_color, validate_color, validate_name, ValidationError};
use atelier_taxonomy::{ProjectTypeInput, Tag, TagInput, TagType, TagTypeInput};

use crate::cache::TaxonomyCache;
use crate::client::{ClientError, TaxonomyApi};
use crate::state::{EntityForm, Level, ListState};

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("A request is already in progress")]
    Busy,

    #[error("No tag type selected")]
    NoSelection,

    #[error("No form is open")]
    NoForm,
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Drives the three-level taxonomy manager (project types, tag types, tags).
///
/// The tag type list is scoped to the selected project type, or to the
/// global tag types when none is selected. The tag list belongs to the
/// selected tag type.
pub struct TaxonomyController<A: TaxonomyApi> {
    api: A,
    cache: TaxonomyCache,
    project_types: ListState,
    tag_types: ListState,
    tags: ListState,
    last_error: Option<String>,
}

impl<A: TaxonomyApi> TaxonomyController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: TaxonomyCache::new(),
            project_types: ListState::default(),
            tag_types: ListState::default(),
            tags: ListState::default(),
            last_error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &TaxonomyCache {
        &self.cache
    }

    pub fn list(&self, level: Level) -> &ListState {
        match level {
            Level::ProjectTypes => &self.project_types,
            Level::TagTypes => &self.tag_types,
            Level::Tags => &self.tags,
        }
    }

    fn list_mut(&mut self, level: Level) -> &mut ListState {
        match level {
            Level::ProjectTypes => &mut self.project_types,
            Level::TagTypes => &mut self.tag_types,
            Level::Tags => &mut self.tags,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Selected project type id, which scopes the tag type list
    pub fn scope(&self) -> Option<&str> {
        self.project_types.selected()
    }

    fn scope_owned(&self) -> Option<String> {
        self.project_types.selected.clone()
    }

    pub fn visible_tag_types(&self) -> &[TagType] {
        self.cache.tag_types(self.scope())
    }

    pub fn selected_tag_type(&self) -> Option<&TagType> {
        let tag_type_id = self.tag_types.selected()?;
        self.cache.tag_type(self.scope(), tag_type_id)
    }

    pub fn visible_tags(&self) -> &[Tag] {
        self.selected_tag_type()
            .map(|tt| tt.tags.as_slice())
            .unwrap_or(&[])
    }

    pub fn create_form_mut(&mut self, level: Level) -> Option<&mut EntityForm> {
        self.list_mut(level).creating.as_mut()
    }

    pub fn edit_form_mut(&mut self, level: Level) -> Option<&mut EntityForm> {
        self.list_mut(level).editing.as_mut().map(|(_, form)| form)
    }

    /// Fetch project types and global tag types into the cache
    pub async fn load(&mut self) -> ControllerResult<()> {
        let project_types = match self.api.list_project_types().await {
            Ok(project_types) => project_types,
            Err(e) => return self.fail("load project types", e),
        };
        let global_tag_types = match self.api.list_tag_types(None).await {
            Ok(tag_types) => tag_types,
            Err(e) => return self.fail("load tag types", e),
        };

        info!(
            "Loaded {} project types and {} global tag types",
            project_types.len(),
            global_tag_types.len()
        );
        self.cache.replace_all(project_types, global_tag_types);
        self.prune_selection();
        self.last_error = None;
        Ok(())
    }

    fn prune_selection(&mut self) {
        if let Some(id) = self.project_types.selected() {
            if self.cache.project_type(id).is_none() {
                self.project_types.reset();
                self.tag_types.reset();
                self.tags.reset();
            }
        }
        if self.tag_types.selected().is_some() && self.selected_tag_type().is_none() {
            self.tag_types.selected = None;
            self.tags.reset();
        }
    }

    /// Open the create panel. An already open panel keeps its contents.
    pub fn begin_create(&mut self, level: Level) -> ControllerResult<()> {
        if level == Level::Tags && self.selected_tag_type().is_none() {
            return Err(ControllerError::NoSelection);
        }

        let list = self.list_mut(level);
        if list.creating.is_none() {
            list.creating = Some(EntityForm::blank(level));
        }
        Ok(())
    }

    pub fn cancel_create(&mut self, level: Level) {
        self.list_mut(level).creating = None;
    }

    pub async fn submit_create(&mut self, level: Level) -> ControllerResult<()> {
        let list = self.list(level);
        if list.is_submitting {
            return Err(ControllerError::Busy);
        }
        let form = list.creating.clone().ok_or(ControllerError::NoForm)?;

        self.list_mut(level).is_submitting = true;
        let result = self.create_remote(level, form).await;
        self.list_mut(level).is_submitting = false;

        match result {
            Ok(()) => {
                self.list_mut(level).creating = None;
                self.last_error = None;
                Ok(())
            }
            Err(e) => self.fail("create", e),
        }
    }

    async fn create_remote(&mut self, level: Level, form: EntityForm) -> ControllerResult<()> {
        let name = validate_name(level.entity_kind(), &form.name)?;
        let scope = self.scope_owned();

        match level {
            Level::ProjectTypes => {
                let project_type = self
                    .api
                    .create_project_type(ProjectTypeInput { name })
                    .await?;
                debug!("Created project type {}", project_type.id);
                self.cache.insert_project_type(project_type);
            }
            Level::TagTypes => {
                let color = validate_color(level.entity_kind(), &form.color)?;
                let tag_type = self
                    .api
                    .create_tag_type(scope, TagTypeInput { name, color })
                    .await?;
                debug!("Created tag type {}", tag_type.id);
                self.cache.insert_tag_type(tag_type);
            }
            Level::Tags => {
                let tag_type_id = self
                    .tag_types
                    .selected
                    .clone()
                    .ok_or(ControllerError::NoSelection)?;
                let color = normalize_optional_color(Some(&form.color))?;
                let tag_type = self
                    .api
                    .create_tag(scope, &tag_type_id, TagInput { name, color })
                    .await?;
                self.cache.replace_tag_type(tag_type);
            }
        }
        Ok(())
    }

    /// Open the edit panel for `id`, pre-filled from the cached entity
    pub fn begin_edit(&mut self, level: Level, id: &str) -> ControllerResult<()> {
        let form = match level {
            Level::ProjectTypes => self
                .cache
                .project_type(id)
                .map(|pt| EntityForm::new(&pt.name, "")),
            Level::TagTypes => self
                .cache
                .tag_type(self.scope(), id)
                .map(|tt| EntityForm::new(&tt.name, &tt.color)),
            Level::Tags => self
                .selected_tag_type()
                .and_then(|tt| tt.find_tag(id))
                .map(|tag| EntityForm::new(&tag.name, tag.color.clone().unwrap_or_default())),
        }
        .ok_or_else(|| ControllerError::NotFound(level.entity_kind().to_string()))?;

        self.list_mut(level).editing = Some((id.to_string(), form));
        Ok(())
    }

    pub fn cancel_edit(&mut self, level: Level) {
        self.list_mut(level).editing = None;
    }

    pub async fn submit_edit(&mut self, level: Level) -> ControllerResult<()> {
        let list = self.list(level);
        if list.is_submitting {
            return Err(ControllerError::Busy);
        }
        let (id, form) = list.editing.clone().ok_or(ControllerError::NoForm)?;

        self.list_mut(level).is_submitting = true;
        let result = self.update_remote(level, &id, form).await;
        self.list_mut(level).is_submitting = false;

        match result {
            Ok(()) => {
                self.list_mut(level).editing = None;
                self.last_error = None;
                Ok(())
            }
            Err(e) => self.fail("update", e),
        }
    }

    async fn update_remote(&mut self, level: Level, id: &str, form: EntityForm) -> ControllerResult<()> {
        let name = validate_name(level.entity_kind(), &form.name)?;
        let scope = self.scope_owned();

        match level {
            Level::ProjectTypes => {
                let project_type = self
                    .api
                    .update_project_type(id, ProjectTypeInput { name })
                    .await?;
                self.cache.replace_project_type(project_type);
            }
            Level::TagTypes => {
                let color = validate_color(level.entity_kind(), &form.color)?;
                let tag_type = self
                    .api
                    .update_tag_type(scope, id, TagTypeInput { name, color })
                    .await?;
                self.cache.replace_tag_type(tag_type);
            }
            Level::Tags => {
                let tag_type_id = self
                    .tag_types
                    .selected
                    .clone()
                    .ok_or(ControllerError::NoSelection)?;
                let color = normalize_optional_color(Some(&form.color))?;
                let tag_type = self
                    .api
                    .update_tag(scope, &tag_type_id, id, TagInput { name, color })
                    .await?;
                self.cache.replace_tag_type(tag_type);
            }
        }
        Ok(())
    }

    /// Expand or collapse a row. Returns false when the click is ignored:
    /// the row is being edited or is not in the visible list.
    pub fn toggle_select(&mut self, level: Level, id: &str) -> bool {
        if self.list(level).is_editing(id) {
            return false;
        }

        let visible = match level {
            Level::ProjectTypes => self.cache.project_type(id).is_some(),
            Level::TagTypes => self.cache.tag_type(self.scope(), id).is_some(),
            Level::Tags => self.visible_tags().iter().any(|tag| tag.id == id),
        };
        if !visible {
            return false;
        }

        self.list_mut(level).toggle(id);
        match level {
            Level::ProjectTypes => {
                self.tag_types.reset();
                self.tags.reset();
            }
            Level::TagTypes => self.tags.reset(),
            Level::Tags => {}
        }
        true
    }

    pub async fn delete(&mut self, level: Level, id: &str) -> ControllerResult<()> {
        let scope = self.scope_owned();

        let result = match level {
            Level::ProjectTypes => self.api.delete_project_type(id).await.map(|_| None),
            Level::TagTypes => self.api.delete_tag_type(scope.clone(), id).await.map(|_| None),
            Level::Tags => {
                let tag_type_id = self
                    .tag_types
                    .selected
                    .clone()
                    .ok_or(ControllerError::NoSelection)?;
                self.api
                    .delete_tag(scope.clone(), &tag_type_id, id)
                    .await
                    .map(Some)
            }
        };

        let parent = match result {
            Ok(parent) => parent,
            Err(e) => return self.fail("delete", e),
        };

        match level {
            Level::ProjectTypes => {
                self.cache.remove_project_type(id);
                let was_selected = self.project_types.is_selected(id);
                self.project_types.forget(id);
                if was_selected {
                    self.project_types.selected =
                        self.cache.project_types().first().map(|pt| pt.id.clone());
                    self.tag_types.reset();
                    self.tags.reset();
                }
            }
            Level::TagTypes => {
                self.cache.remove_tag_type(scope.as_deref(), id);
                let was_selected = self.tag_types.is_selected(id);
                self.tag_types.forget(id);
                if was_selected {
                    self.tags.reset();
                }
            }
            Level::Tags => {
                if let Some(tag_type) = parent {
                    self.cache.replace_tag_type(tag_type);
                }
                self.tags.forget(id);
            }
        }

        info!("Deleted {} {}", level.entity_kind(), id);
        self.last_error = None;
        Ok(())
    }

    fn fail<T>(&mut self, action: &str, err: impl Into<ControllerError>) -> ControllerResult<T> {
        let err = err.into();
        error!(action = %action, error = %err, "Taxonomy operation failed");
        self.last_error = Some(err.to_string());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientResult;
    use atelier_taxonomy::ProjectType;
    use chrono::Utc;
    use mockall::mock;
    use pretty_assertions::assert_eq;

    mock! {
        TaxonomyApi {}

        #[async_trait::async_trait]
        impl TaxonomyApi for TaxonomyApi {
            async fn list_project_types(&self) -> ClientResult<Vec<ProjectType>>;
            async fn create_project_type(&self, input: ProjectTypeInput) -> ClientResult<ProjectType>;
            async fn update_project_type(&self, project_type_id: &str, input: ProjectTypeInput) -> ClientResult<ProjectType>;
            async fn delete_project_type(&self, project_type_id: &str) -> ClientResult<()>;
            async fn list_tag_types(&self, scope: Option<String>) -> ClientResult<Vec<TagType>>;
            async fn create_tag_type(&self, scope: Option<String>, input: TagTypeInput) -> ClientResult<TagType>;
            async fn update_tag_type(&self, scope: Option<String>, tag_type_id: &str, input: TagTypeInput) -> ClientResult<TagType>;
            async fn delete_tag_type(&self, scope: Option<String>, tag_type_id: &str) -> ClientResult<()>;
            async fn create_tag(&self, scope: Option<String>, tag_type_id: &str, input: TagInput) -> ClientResult<TagType>;
            async fn update_tag(&self, scope: Option<String>, tag_type_id: &str, tag_id: &str, input: TagInput) -> ClientResult<TagType>;
            async fn delete_tag(&self, scope: Option<String>, tag_type_id: &str, tag_id: &str) -> ClientResult<TagType>;
        }
    }

    fn project_type(id: &str, tag_types: Vec<TagType>) -> ProjectType {
        ProjectType {
            id: id.to_string(),
            name: format!("Project {}", id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tag_types,
        }
    }

    fn tag_type(id: &str, scope: Option<&str>) -> TagType {
        TagType {
            id: id.to_string(),
            name: format!("Tag type {}", id),
            color: "#228B22".to_string(),
            project_type_id: scope.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: vec![],
        }
    }

    fn server_error() -> ClientError {
        ClientError::Api {
            status: 500,
            message: "database is locked".to_string(),
        }
    }

    async fn loaded(mut api: MockTaxonomyApi) -> TaxonomyController<MockTaxonomyApi> {
        api.expect_list_project_types().returning(|| {
            Ok(vec![
                project_type("pt-1", vec![tag_type("tt-1", Some("pt-1"))]),
                project_type("pt-2", vec![]),
            ])
        });
        api.expect_list_tag_types()
            .returning(|_| Ok(vec![tag_type("tt-global", None)]));

        let mut controller = TaxonomyController::new(api);
        controller.load().await.unwrap();
        controller
    }

    #[tokio::test]
    async fn test_failed_create_leaves_state_unchanged() {
        let mut api = MockTaxonomyApi::new();
        api.expect_create_project_type()
            .times(1)
            .returning(|_| Err(server_error()));

        let mut controller = loaded(api).await;
        let before = controller.cache().clone();

        controller.begin_create(Level::ProjectTypes).unwrap();
        controller.create_form_mut(Level::ProjectTypes).unwrap().name = "Branding".to_string();

        let err = controller.submit_create(Level::ProjectTypes).await.unwrap_err();
        assert!(matches!(err, ControllerError::Client(_)));

        assert_eq!(controller.cache(), &before);
        let list = controller.list(Level::ProjectTypes);
        assert_eq!(list.creating.as_ref().unwrap().name, "Branding");
        assert!(!list.is_submitting);
        assert!(controller.last_error().unwrap().contains("database is locked"));
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_before_any_request() {
        let mut api = MockTaxonomyApi::new();
        api.expect_create_tag_type().never();

        let mut controller = loaded(api).await;
        controller.begin_create(Level::TagTypes).unwrap();

        let err = controller.submit_create(Level::TagTypes).await.unwrap_err();
        assert!(matches!(err, ControllerError::Validation(_)));
        assert!(controller.last_error().is_some());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_selection() {
        let mut api = MockTaxonomyApi::new();
        api.expect_delete_tag_type().returning(|_, _| {
            Err(ClientError::Api {
                status: 404,
                message: "Tag type not found".to_string(),
            })
        });

        let mut controller = loaded(api).await;
        assert!(controller.toggle_select(Level::ProjectTypes, "pt-1"));
        assert!(controller.toggle_select(Level::TagTypes, "tt-1"));

        let err = controller.delete(Level::TagTypes, "tt-1").await.unwrap_err();
        assert!(matches!(&err, ControllerError::Client(e) if e.is_not_found()));

        assert_eq!(controller.list(Level::TagTypes).selected(), Some("tt-1"));
        assert_eq!(controller.visible_tag_types().len(), 1);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_busy() {
        let mut api = MockTaxonomyApi::new();
        api.expect_update_project_type().never();

        let mut controller = loaded(api).await;
        controller.begin_edit(Level::ProjectTypes, "pt-1").unwrap();
        controller.list_mut(Level::ProjectTypes).is_submitting = true;

        let err = controller.submit_edit(Level::ProjectTypes).await.unwrap_err();
        assert!(matches!(err, ControllerError::Busy));
    }

    #[tokio::test]
    async fn test_tag_type_scope_follows_project_selection() {
        let mut api = MockTaxonomyApi::new();
        api.expect_create_tag_type()
            .withf(|scope, input| scope.as_deref() == Some("pt-2") && input.color == "#3b82f6")
            .times(1)
            .returning(|_, input| {
                let mut created = tag_type("tt-new", Some("pt-2"));
                created.name = input.name;
                Ok(created)
            });

        let mut controller = loaded(api).await;
        assert_eq!(controller.visible_tag_types()[0].id, "tt-global");

        controller.toggle_select(Level::ProjectTypes, "pt-2");
        assert!(controller.visible_tag_types().is_empty());

        controller.begin_create(Level::TagTypes).unwrap();
        controller.create_form_mut(Level::TagTypes).unwrap().name = "Audience".to_string();
        controller.submit_create(Level::TagTypes).await.unwrap();

        assert_eq!(controller.visible_tag_types().len(), 1);
        assert_eq!(controller.visible_tag_types()[0].name, "Audience");
        assert!(controller.list(Level::TagTypes).creating.is_none());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_cache() {
        let mut api = MockTaxonomyApi::new();
        api.expect_list_project_types()
            .returning(|| Err(server_error()));

        let mut controller = TaxonomyController::new(api);
        assert!(controller.load().await.is_err());
        assert!(controller.cache().project_types().is_empty());
        assert!(controller.last_error().is_some());
    }

    #[tokio::test]
    async fn test_tags_need_a_selected_tag_type() {
        let controller_api = MockTaxonomyApi::new();
        let mut controller = loaded(controller_api).await;

        assert!(matches!(
            controller.begin_create(Level::Tags),
            Err(ControllerError::NoSelection)
        ));
        assert!(matches!(
            controller.delete(Level::Tags, "tag-1").await,
            Err(ControllerError::NoSelection)
        ));
    }
}
