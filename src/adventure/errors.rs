use thiserror::Error;

/// Errors that can arise from item construction and the save-file layer.
///
/// A missing or unreadable save file is not an error: `load_game` recovers those
/// with the default state and reports the fallback instead.
#[derive(Debug, Error)]
pub enum AdventureError {
    /// Wrapper around IO errors (directory creation, temp file, rename).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json serialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An item record violates its variant's field constraints.
    #[error("invalid item {name:?}: {reason}")]
    InvalidItem { name: String, reason: String },

    /// Character name rejected by validation.
    #[error("invalid character name: {0}")]
    InvalidName(#[from] crate::validation::NameError),

    /// Another process holds the save lock.
    #[error("save file is locked: {0}")]
    SaveLocked(String),
}
