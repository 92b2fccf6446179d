//! Error types for playback coordination

use thiserror::Error;

/// Playback errors
///
/// Commands on [`crate::PlaybackCoordinator`] never return these; they end up
/// as the `error` text of the playback snapshot. Engines and catalogs use them
/// directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Engine failed to fetch or decode the requested audio
    #[error("Failed to load audio: {0}")]
    Load(String),

    /// Engine refused the load request synchronously
    #[error("Unable to load audio file: {url}")]
    LoadRejected { url: String },

    /// Command issued while no engine is registered
    #[error("No audio engine registered")]
    EngineUnavailable,

    /// Releasing an engine handle failed
    #[error("Failed to destroy audio engine: {0}")]
    Destroy(String),

    /// Any other engine command failure
    #[error("Audio engine error: {0}")]
    Engine(String),

    /// Catalog content is unusable
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl PlaybackError {
    /// Build a [`PlaybackError::Load`] from an engine message, which may be empty
    pub fn load(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Load("unknown error".to_string())
        } else {
            Self::Load(message)
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
