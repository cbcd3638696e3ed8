// ABOUTME: Process-local copy of the last known taxonomy server state
// ABOUTME: Every successful mutation response replaces a whole subtree

use atelier_taxonomy::{ProjectType, TagType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxonomyCache {
    project_types: Vec<ProjectType>,
    global_tag_types: Vec<TagType>,
}

impl TaxonomyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, project_types: Vec<ProjectType>, global_tag_types: Vec<TagType>) {
        self.project_types = project_types;
        self.global_tag_types = global_tag_types;
    }

    pub fn project_types(&self) -> &[ProjectType] {
        &self.project_types
    }

    pub fn project_type(&self, project_type_id: &str) -> Option<&ProjectType> {
        self.project_types.iter().find(|pt| pt.id == project_type_id)
    }

    /// Tag types under a project type, or the global ones for `None`.
    /// An unknown project type yields an empty slice.
    pub fn tag_types(&self, scope: Option<&str>) -> &[TagType] {
        match scope {
            Some(project_type_id) => self
                .project_type(project_type_id)
                .map(|pt| pt.tag_types.as_slice())
                .unwrap_or(&[]),
            None => &self.global_tag_types,
        }
    }

    pub fn tag_type(&self, scope: Option<&str>, tag_type_id: &str) -> Option<&TagType> {
        self.tag_types(scope).iter().find(|tt| tt.id == tag_type_id)
    }

    /// Replace a project type subtree, appending it if it is new
    pub fn replace_project_type(&mut self, project_type: ProjectType) {
        match self
            .project_types
            .iter_mut()
            .find(|pt| pt.id == project_type.id)
        {
            Some(existing) => *existing = project_type,
            None => self.project_types.push(project_type),
        }
    }

    pub fn insert_project_type(&mut self, project_type: ProjectType) {
        self.replace_project_type(project_type);
    }

    pub fn remove_project_type(&mut self, project_type_id: &str) -> Option<ProjectType> {
        let index = self
            .project_types
            .iter()
            .position(|pt| pt.id == project_type_id)?;
        Some(self.project_types.remove(index))
    }

    /// Replace a tag type subtree inside the list its `project_type_id` points
    /// at, appending it if it is new. Returns false when the owning project
    /// type is not cached.
    pub fn replace_tag_type(&mut self, tag_type: TagType) -> bool {
        let list = match tag_type.project_type_id.as_deref() {
            Some(project_type_id) => match self
                .project_types
                .iter_mut()
                .find(|pt| pt.id == project_type_id)
            {
                Some(pt) => &mut pt.tag_types,
                None => return false,
            },
            None => &mut self.global_tag_types,
        };

        match list.iter_mut().find(|tt| tt.id == tag_type.id) {
            Some(existing) => *existing = tag_type,
            None => list.push(tag_type),
        }
        true
    }

    pub fn insert_tag_type(&mut self, tag_type: TagType) -> bool {
        self.replace_tag_type(tag_type)
    }

    pub fn remove_tag_type(&mut self, scope: Option<&str>, tag_type_id: &str) -> Option<TagType> {
        let list = match scope {
            Some(project_type_id) => {
                &mut self
                    .project_types
                    .iter_mut()
                    .find(|pt| pt.id == project_type_id)?
                    .tag_types
            }
            None => &mut self.global_tag_types,
        };
        let index = list.iter().position(|tt| tt.id == tag_type_id)?;
        Some(list.remove(index))
    }
}
