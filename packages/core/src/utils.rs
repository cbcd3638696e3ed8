// ABOUTME: Shared utility functions for Atelier
// ABOUTME: ID generation for taxonomy rows

/// Generate a prefixed unique id, e.g. `tag-V1StGXR8_Z5jdHi6B-myT`
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, nanoid::nanoid!())
}
