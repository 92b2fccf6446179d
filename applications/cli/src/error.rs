/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid step `{step}`: {reason}")]
    Step { step: String, reason: String },

    #[error("Playback error: {0}")]
    Playback(#[from] waveplay_playback::PlaybackError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn step(step: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Step {
            step: step.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
