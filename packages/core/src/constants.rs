use std::env;
use std::path::PathBuf;

/// Longest accepted name for any taxonomy entity, in characters
pub const MAX_NAME_CHARS: usize = 255;

/// Get the path to the Atelier directory (~/.atelier)
pub fn atelier_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".atelier")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".atelier")
    }
}

/// Get the default database path (~/.atelier/atelier.db)
pub fn database_file() -> PathBuf {
    atelier_dir().join("atelier.db")
}
