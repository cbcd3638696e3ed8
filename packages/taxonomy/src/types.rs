// ABOUTME: Taxonomy type definitions
// ABOUTME: Entities as returned over the wire, plus create/update inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectType {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tag_types: Vec<TagType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagType {
    pub id: String,
    pub name: String,
    pub color: String,
    /// `None` for global tag types
    pub project_type_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// Absent means the tag inherits its tag type's color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub tag_type_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Missing fields deserialize as empty strings so they fail validation
// instead of being rejected by the JSON extractor.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectTypeInput {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagTypeInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Create and update body for tags. Updates replace the color: omit it to inherit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// The color a tag renders with: its own override, or its tag type's color
pub fn effective_color<'a>(tag: &'a Tag, tag_type: &'a TagType) -> &'a str {
    tag.color.as_deref().unwrap_or(&tag_type.color)
}

impl TagType {
    pub fn find_tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == tag_id)
    }
}

impl ProjectType {
    pub fn find_tag_type(&self, tag_type_id: &str) -> Option<&TagType> {
        self.tag_types.iter().find(|tag_type| tag_type.id == tag_type_id)
    }
}
