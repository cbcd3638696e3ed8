// ABOUTME: Core types, color math, and validation for Atelier
// ABOUTME: Foundational package shared by storage, API, and dashboard crates

pub mod color;
pub mod constants;
pub mod utils;
pub mod validation;

// Re-export color model
pub use color::{
    contrast_color, hex_to_hsv, hsv_to_hex, hsv_to_hex_with_case, hsv_to_rgb, is_valid_hex,
    parse_hex, rgb_to_hsv, HexCase, Hsv, Rgb, FALLBACK_HSV,
};

// Re-export constants
pub use constants::{atelier_dir, database_file, MAX_NAME_CHARS};

// Re-export utilities
pub use utils::generate_id;

// Re-export validation
pub use validation::{
    normalize_optional_color, validate_color, validate_name, EntityKind, ValidationError,
};
