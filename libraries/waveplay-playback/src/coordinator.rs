//! Playback coordinator - core orchestration
//!
//! Owns the single live engine handle, turns UI commands into engine calls and
//! folds engine events into the playback snapshot.

use crate::{
    engine::{AudioEngine, EngineEvent, EventSink, HandleId, Mailbox, RequestId},
    error::{PlaybackError, Result},
    events,
    types::{PlaybackState, PlayerConfig},
    volume::Volume,
};
use tracing::{debug, trace, warn};

/// Coordinates one audio engine and the state every UI consumer reads
///
/// Commands never fail from the caller's point of view: issued without an
/// engine they do nothing, and engine failures land in
/// [`PlaybackState::error`]. Engine events are queued by the engine and
/// applied by [`PlaybackCoordinator::pump`].
pub struct PlaybackCoordinator {
    config: PlayerConfig,

    // Current snapshot and how many times it has been replaced
    state: PlaybackState,
    revision: u64,

    volume: Volume,

    // Live engine and the id its events are stamped with
    engine: Option<Box<dyn AudioEngine>>,
    handle: Option<HandleId>,
    next_handle: u64,

    // Latest load request; tagged events for older requests are stale
    latest_request: Option<RequestId>,
    next_request: u64,

    mailbox: Mailbox,
}

impl PlaybackCoordinator {
    /// Create a coordinator seeded from `config`
    pub fn new(config: PlayerConfig) -> Self {
        let mut state = PlaybackState::seeded(&config);
        let volume = Volume::new(config.initial_volume, config.unmute_fallback_volume);
        state.volume = volume.level();

        Self {
            config,
            state,
            revision: 0,
            volume,
            engine: None,
            handle: None,
            next_handle: 0,
            latest_request: None,
            next_request: 0,
            mailbox: Mailbox::default(),
        }
    }

    // ===== Snapshot =====

    /// Current playback snapshot
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Incremented every time the snapshot changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Whether an engine is registered
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Id of the registered engine handle
    pub fn handle(&self) -> Option<HandleId> {
        self.handle
    }

    /// Number of engine events waiting for [`Self::pump`]
    pub fn pending_events(&self) -> usize {
        self.mailbox.len()
    }

    // ===== Engine lifecycle =====

    /// Replace the managed engine
    ///
    /// The previous engine is destroyed first and its queued events are
    /// discarded; destroy failures are only logged. Releasing an engine
    /// clears everything it reported (play state, loading, duration and
    /// position), so nothing can be sought until the next `Ready`. With
    /// `None` the coordinator goes back to the "no engine" state. A new
    /// engine is subscribed, receives the effective volume, and loads the
    /// default track if nothing has been loaded yet.
    pub fn register_engine(&mut self, engine: Option<Box<dyn AudioEngine>>) {
        if self.release() || engine.is_none() {
            let mut next = self.state.clone();
            next.is_playing = false;
            next.is_loading = false;
            next.duration = 0.0;
            next.current_time = 0.0;
            self.commit(next);
        }

        let Some(mut engine) = engine else {
            debug!("Audio engine unregistered");
            return;
        };

        self.next_handle += 1;
        let handle = HandleId(self.next_handle);
        engine.subscribe(EventSink::new(handle, self.mailbox.clone()));

        self.engine = Some(engine);
        self.handle = Some(handle);
        debug!(%handle, "Audio engine registered");

        let effective = self.volume.effective();
        self.forward("set volume", |engine| engine.set_volume(effective));

        if self.latest_request.is_none() {
            if let Some(track) = self.config.default_track.clone() {
                self.load_track(track.url, Some(track.title), track.cover);
            }
        }
    }

    /// Destroy the current engine, returning whether there was one
    fn release(&mut self) -> bool {
        let released = match self.engine.take() {
            Some(mut engine) => {
                if let Err(err) = engine.destroy() {
                    warn!(%err, "Ignoring failure while releasing audio engine");
                }
                true
            }
            None => false,
        };

        if let Some(handle) = self.handle.take() {
            let dropped = self.mailbox.discard(handle);
            if dropped > 0 {
                trace!(%handle, dropped, "Discarded events from released engine");
            }
        }

        released
    }

    // ===== Commands =====

    /// Load a track
    ///
    /// Sets the url and display metadata right away and marks the snapshot as
    /// loading; the outcome arrives as engine events. Without an engine this
    /// does nothing.
    pub fn load_track(
        &mut self,
        url: impl Into<String>,
        title: Option<String>,
        cover: Option<String>,
    ) {
        let url = url.into();
        let Some(engine) = self.engine.as_mut() else {
            trace!(%url, err = %PlaybackError::EngineUnavailable, "Ignoring load");
            return;
        };

        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.latest_request = Some(request);
        debug!(%url, %request, "Loading track");

        let result = engine.load(&url, request);

        let mut next = self.state.clone();
        next.audio_url = Some(url.clone());
        next.title = title;
        next.cover = cover;
        next.is_loading = true;
        next.error = None;

        if let Err(err) = result {
            warn!(%url, %err, "Audio engine rejected load");
            next.error = Some(PlaybackError::LoadRejected { url }.to_string());
            next.is_loading = false;
        }

        self.commit(next);
    }

    /// Toggle play/pause
    ///
    /// `is_playing` follows the engine's play/pause events, not this call.
    pub fn toggle_play_pause(&mut self) {
        self.forward("play/pause", |engine| engine.play_pause());
    }

    /// Set volume (0.0-1.0); 0 mutes, anything else unmutes
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_level(volume);
        let level = self.volume.effective();
        self.forward("set volume", |engine| engine.set_volume(level));
        self.commit_volume();
    }

    /// Toggle mute
    ///
    /// Muting sends 0 to the engine and keeps the stored volume; unmuting
    /// sends the stored volume back, or the fallback level if it was 0.
    /// Without an engine this does nothing.
    pub fn toggle_mute(&mut self) {
        if self.engine.is_none() {
            trace!(err = %PlaybackError::EngineUnavailable, "Ignoring toggle mute");
            return;
        }

        self.volume.toggle_mute();
        let level = self.volume.effective();
        self.forward("toggle mute", |engine| engine.set_volume(level));
        self.commit_volume();
    }

    /// Seek to `time` seconds
    ///
    /// Does nothing until the duration is known.
    pub fn seek_to(&mut self, time: f64) {
        let duration = self.state.duration;
        if duration <= 0.0 || !time.is_finite() {
            trace!(time, duration, "Ignoring seek");
            return;
        }

        let fraction = (time / duration).clamp(0.0, 1.0);
        self.forward("seek", |engine| engine.seek_to(fraction));
    }

    // ===== Events =====

    /// Apply queued engine events, returning how many were applied
    ///
    /// Events from released handles and tagged events of superseded loads are
    /// dropped and not counted.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;

        while let Some(envelope) = self.mailbox.pop() {
            if Some(envelope.handle) != self.handle {
                trace!(handle = %envelope.handle, "Dropping event from released engine");
                continue;
            }

            if let Some(request) = envelope.request {
                if Some(request) != self.latest_request {
                    trace!(%request, event = ?envelope.event, "Dropping event from superseded load");
                    continue;
                }
            }

            let event = match envelope.event {
                EngineEvent::Ready { duration } if !duration.is_finite() || duration < 0.0 => {
                    EngineEvent::Ready {
                        duration: self.engine.as_ref().map_or(0.0, |engine| engine.duration()),
                    }
                }
                event => event,
            };

            let next = events::reduce(&self.state, &event);
            self.commit(next);
            applied += 1;
        }

        applied
    }

    // ===== Internal =====

    /// Run an engine command, recording failures in the snapshot
    ///
    /// Returns false when no engine is registered.
    fn forward<F>(&mut self, command: &'static str, f: F) -> bool
    where
        F: FnOnce(&mut Box<dyn AudioEngine>) -> Result<()>,
    {
        let Some(engine) = self.engine.as_mut() else {
            trace!(command, err = %PlaybackError::EngineUnavailable, "Ignoring command");
            return false;
        };

        if let Err(err) = f(engine) {
            warn!(command, %err, "Audio engine command failed");
            let mut next = self.state.clone();
            next.error = Some(err.to_string());
            self.commit(next);
        }

        true
    }

    fn commit_volume(&mut self) {
        let mut next = self.state.clone();
        next.volume = self.volume.level();
        next.is_muted = self.volume.is_muted();
        self.commit(next);
    }

    /// Replace the snapshot if anything changed
    fn commit(&mut self, next: PlaybackState) {
        if next != self.state {
            self.state = next;
            self.revision += 1;
        }
    }
}

impl Default for PlaybackCoordinator {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl Drop for PlaybackCoordinator {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("handle", &self.handle)
            .field("latest_request", &self.latest_request)
            .finish_non_exhaustive()
    }
}
