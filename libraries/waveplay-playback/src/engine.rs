//! External audio engine contract
//!
//! The engine decodes, plays and draws the waveform. The coordinator only
//! sends it commands and receives its lifecycle events through an
//! [`EventSink`]. Engines live on the UI thread, so nothing here is `Send`.

use crate::error::Result;
use crate::types::WaveformOptions;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Identity of one registered engine handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub(crate) u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine#{}", self.0)
    }
}

/// Identity of one load request, increasing with every `load_track`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub(crate) u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Lifecycle events emitted by an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Fetch/decode started
    Loading,

    /// Track decoded, duration in seconds known
    Ready { duration: f64 },

    /// Playback started or resumed
    Play,

    /// Playback paused
    Pause,

    /// Playback reached the end of the track
    Finish,

    /// Playback position in seconds
    TimeUpdate(f64),

    /// Load failed (message may be empty)
    Error(String),
}

/// An event plus the handle and (optionally) the load request it belongs to
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Envelope {
    pub handle: HandleId,
    pub request: Option<RequestId>,
    pub event: EngineEvent,
}

/// Queue shared between the coordinator and the sinks it hands out
#[derive(Debug, Clone, Default)]
pub(crate) struct Mailbox(Rc<RefCell<VecDeque<Envelope>>>);

impl Mailbox {
    fn push(&self, envelope: Envelope) {
        self.0.borrow_mut().push_back(envelope);
    }

    pub fn pop(&self) -> Option<Envelope> {
        self.0.borrow_mut().pop_front()
    }

    /// Drop everything queued by `handle`
    pub fn discard(&self, handle: HandleId) -> usize {
        let mut queue = self.0.borrow_mut();
        let before = queue.len();
        queue.retain(|e| e.handle != handle);
        before - queue.len()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }
}

/// Where an engine delivers its events
///
/// Cheap to clone; every clone feeds the same coordinator and is stamped with
/// the handle it was issued for. Events pushed after the handle was replaced
/// are ignored by the coordinator.
#[derive(Debug, Clone)]
pub struct EventSink {
    handle: HandleId,
    mailbox: Mailbox,
}

impl EventSink {
    pub(crate) fn new(handle: HandleId, mailbox: Mailbox) -> Self {
        Self { handle, mailbox }
    }

    /// Handle this sink was issued for
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    /// Emit an event that is not tied to a particular load
    pub fn emit(&self, event: EngineEvent) {
        self.mailbox.push(Envelope {
            handle: self.handle,
            request: None,
            event,
        });
    }

    /// Emit an event produced by the load `request`
    ///
    /// Events for a request that has since been superseded are dropped.
    pub fn emit_for(&self, request: RequestId, event: EngineEvent) {
        self.mailbox.push(Envelope {
            handle: self.handle,
            request: Some(request),
            event,
        });
    }
}

/// Platform audio engine
///
/// One instance per visual surface. Implementors render the waveform and play
/// the audio; the coordinator never touches samples.
pub trait AudioEngine {
    /// Start delivering lifecycle events to `sink`
    ///
    /// Called once, right after the handle is registered.
    fn subscribe(&mut self, sink: EventSink);

    /// Start loading `url`
    ///
    /// # Returns
    /// * `Ok(())` - Request accepted, outcome follows as events
    /// * `Err(_)` - Request refused synchronously
    fn load(&mut self, url: &str, request: RequestId) -> Result<()>;

    /// Toggle between playing and paused
    fn play_pause(&mut self) -> Result<()>;

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Seek to a position given as a fraction of the duration (0.0-1.0)
    fn seek_to(&mut self, fraction: f64) -> Result<()>;

    /// Duration of the loaded track in seconds (0 if unknown)
    fn duration(&self) -> f64;

    /// Release the engine and everything it renders
    fn destroy(&mut self) -> Result<()>;
}

/// Creates engines for a render target
pub trait EngineFactory {
    /// Mount point the engine draws into
    type Container: ?Sized;

    /// Create an engine bound to `container`
    fn create(
        &self,
        container: &Self::Container,
        options: &WaveformOptions,
    ) -> Result<Box<dyn AudioEngine>>;
}
