//! Player surface: cover art and the waveform mount point

use crate::{
    coordinator::PlaybackCoordinator,
    engine::EngineFactory,
    error::Result,
    presentation::WaveformOverlay,
    types::{PlaybackState, Track, WaveformOptions},
};
use tracing::debug;

/// Mounts an engine into a container and binds it to the coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSurface {
    options: WaveformOptions,
    default_cover: String,
}

impl PlayerSurface {
    pub fn new(options: WaveformOptions, default_cover: impl Into<String>) -> Self {
        Self {
            options,
            default_cover: default_cover.into(),
        }
    }

    /// Surface using the coordinator's configured appearance
    pub fn from_coordinator(coordinator: &PlaybackCoordinator) -> Self {
        let config = coordinator.config();
        Self::new(config.waveform.clone(), config.default_cover.clone())
    }

    pub fn options(&self) -> &WaveformOptions {
        &self.options
    }

    /// Create an engine in `container` and register it
    ///
    /// Does nothing if the coordinator already has an engine. Returns whether
    /// a new engine was created.
    pub fn mount<F: EngineFactory>(
        &self,
        coordinator: &mut PlaybackCoordinator,
        factory: &F,
        container: &F::Container,
    ) -> Result<bool> {
        if coordinator.has_engine() {
            return Ok(false);
        }

        let engine = factory.create(container, &self.options)?;
        coordinator.register_engine(Some(engine));
        debug!("Player surface mounted");
        Ok(true)
    }

    /// Release the engine
    pub fn unmount(&self, coordinator: &mut PlaybackCoordinator) {
        coordinator.register_engine(None);
        debug!("Player surface unmounted");
    }

    /// Cover to display: snapshot, then the selected catalog entry, then the default
    pub fn cover<'a>(&'a self, state: &'a PlaybackState, selected: Option<&'a Track>) -> &'a str {
        state
            .cover
            .as_deref()
            .or_else(|| selected.and_then(|t| t.cover.as_deref()))
            .unwrap_or(&self.default_cover)
    }

    /// Overlay shown on top of the waveform
    pub fn overlay(&self, state: &PlaybackState) -> WaveformOverlay {
        WaveformOverlay::for_state(state)
    }
}
