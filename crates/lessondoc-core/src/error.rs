//! Error types for lesson loading
//!
//! Rendering itself never fails; these errors only cover reading lessons,
//! manifests and configuration from storage.

use thiserror::Error;

/// Result type for lesson operations
pub type Result<T> = std::result::Result<T, LessonError>;

/// Errors that can occur while loading lesson content
#[derive(Debug, Error)]
pub enum LessonError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed lesson or manifest JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed configuration file
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Lesson id not listed in the course manifest
    #[error("Lesson not found: {0}")]
    LessonNotFound(String),

    /// Lesson listed without a file path
    #[error("Lesson has no content path: {0}")]
    MissingPath(String),
}
