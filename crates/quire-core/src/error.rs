//! Error types for quire-core

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::playback::PlaybackError;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for store operations.
///
/// Remote failures never surface here: the store converts them into
/// transient `Notice` events per its uniform failure policy. These variants
/// cover synchronous precondition violations and setup problems only.
#[derive(Error, Debug)]
pub enum CoreError {
    /// API-level errors (surfaced from setup paths, not command handlers)
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Playback errors
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Referenced workspace id is not in the cached list
    #[error("Workspace not found: {0}")]
    UnknownWorkspace(i64),

    /// Command precondition violated
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
