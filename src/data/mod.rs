//! Immutable content database: element chart, species, moves and items.
//!
//! The engine consumes these records; authoring and loading live outside
//! this crate. The tables here are a compact built-in set used by the
//! engine and its tests.

pub mod items;
pub mod moves;
pub mod species;
pub mod types;

/// Lowercase a display name into a table key.
pub fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
