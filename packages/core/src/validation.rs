// ABOUTME: Input validation for taxonomy entities
// ABOUTME: Name and color checks shared by storage and the dashboard forms

use std::fmt;
use thiserror::Error;

use crate::color::is_valid_hex;
use crate::constants::MAX_NAME_CHARS;

/// Which taxonomy entity a value belongs to, for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    ProjectType,
    TagType,
    Tag,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::ProjectType => write!(f, "Project type"),
            EntityKind::TagType => write!(f, "Tag type"),
            EntityKind::Tag => write!(f, "Tag"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity} name is required")]
    EmptyName { entity: EntityKind },
    #[error("{entity} name must be at most {max} characters")]
    NameTooLong { entity: EntityKind, max: usize },
    #[error("{entity} color is required")]
    MissingColor { entity: EntityKind },
    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),
}

/// Trim and check a name, returning the value to store
pub fn validate_name(entity: EntityKind, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName { entity });
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong {
            entity,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// Check a required color. The original casing is kept.
pub fn validate_color(entity: EntityKind, color: &str) -> Result<String, ValidationError> {
    let trimmed = color.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingColor { entity });
    }
    if !is_valid_hex(trimmed) {
        return Err(ValidationError::InvalidColor(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Check an optional color override. Blank means "inherit".
pub fn normalize_optional_color(color: Option<&str>) -> Result<Option<String>, ValidationError> {
    match color.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if is_valid_hex(value) => Ok(Some(value.to_string())),
        Some(value) => Err(ValidationError::InvalidColor(value.to_string())),
    }
}
