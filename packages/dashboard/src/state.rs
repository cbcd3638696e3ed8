// ABOUTME: Per-list view state for the taxonomy manager
// ABOUTME: Creating, editing, and selection are tracked independently per level

use atelier_core::EntityKind;

/// Default color offered by a new tag type form
pub const DEFAULT_TAG_TYPE_COLOR: &str = "#3b82f6";

/// Which list of the taxonomy manager an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    ProjectTypes,
    TagTypes,
    Tags,
}

impl Level {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Level::ProjectTypes => EntityKind::ProjectType,
            Level::TagTypes => EntityKind::TagType,
            Level::Tags => EntityKind::Tag,
        }
    }
}

/// Contents of a create or edit panel. Color is ignored for project types
/// and blank means "inherit" for tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityForm {
    pub name: String,
    pub color: String,
}

impl EntityForm {
    pub fn blank(level: Level) -> Self {
        let color = match level {
            Level::TagTypes => DEFAULT_TAG_TYPE_COLOR.to_string(),
            Level::ProjectTypes | Level::Tags => String::new(),
        };
        Self {
            name: String::new(),
            color,
        }
    }

    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Form mode of a list. Selection is tracked separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMode<'a> {
    Idle,
    Creating,
    Editing(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub creating: Option<EntityForm>,
    pub editing: Option<(String, EntityForm)>,
    pub selected: Option<String>,
    pub is_submitting: bool,
}

impl ListState {
    pub fn mode(&self) -> ListMode<'_> {
        if let Some((id, _)) = &self.editing {
            ListMode::Editing(id)
        } else if self.creating.is_some() {
            ListMode::Creating
        } else {
            ListMode::Idle
        }
    }

    pub fn is_editing(&self, id: &str) -> bool {
        matches!(&self.editing, Some((editing_id, _)) if editing_id == id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Accordion toggle: clicking the open row closes it, any other row
    /// replaces the selection.
    pub fn toggle(&mut self, id: &str) {
        if self.is_selected(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
    }

    /// Drop editing and selection state that refers to `id`
    pub fn forget(&mut self, id: &str) {
        if self.is_editing(id) {
            self.editing = None;
        }
        if self.is_selected(id) {
            self.selected = None;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
