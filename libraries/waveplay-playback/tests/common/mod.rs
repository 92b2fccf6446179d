//! Shared test helpers: a scriptable in-memory engine

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use waveplay_playback::{
    AudioEngine, EngineEvent, EngineFactory, EventSink, PlaybackError, RequestId, Result, Track,
    TrackCatalog, WaveformOptions,
};

/// Commands the fake engine received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Subscribe,
    Load(String),
    PlayPause,
    SetVolume(f32),
    SeekTo(f64),
    Destroy,
}

#[derive(Default)]
struct EngineLog {
    calls: Vec<Call>,
    requests: Vec<RequestId>,
    sink: Option<EventSink>,
    reject_loads: bool,
    fail_play: bool,
    fail_destroy: bool,
    duration: f64,
}

/// Mock engine; clones share one log so tests can inspect a boxed engine
#[derive(Clone, Default)]
pub struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_loads(self) -> Self {
        self.log.borrow_mut().reject_loads = true;
        self
    }

    pub fn failing_play(self) -> Self {
        self.log.borrow_mut().fail_play = true;
        self
    }

    pub fn failing_destroy(self) -> Self {
        self.log.borrow_mut().fail_destroy = true;
        self
    }

    pub fn with_duration(self, duration: f64) -> Self {
        self.log.borrow_mut().duration = duration;
        self
    }

    pub fn boxed(&self) -> Box<dyn AudioEngine> {
        Box::new(self.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.log.borrow_mut().calls.clear();
    }

    pub fn count(&self, call: &Call) -> usize {
        self.log.borrow().calls.iter().filter(|c| *c == call).count()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.log
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::SeekTo(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn last_volume(&self) -> Option<f32> {
        self.log.borrow().calls.iter().rev().find_map(|c| match c {
            Call::SetVolume(v) => Some(*v),
            _ => None,
        })
    }

    pub fn is_destroyed(&self) -> bool {
        self.count(&Call::Destroy) > 0
    }

    /// Request id of the n-th load this engine received
    pub fn request(&self, n: usize) -> RequestId {
        self.log.borrow().requests[n]
    }

    /// Emit an untagged event through the subscribed sink
    pub fn emit(&self, event: EngineEvent) {
        let sink = self.log.borrow().sink.clone();
        sink.expect("engine not subscribed").emit(event);
    }

    /// Emit an event attributed to a load request
    pub fn emit_for(&self, request: RequestId, event: EngineEvent) {
        let sink = self.log.borrow().sink.clone();
        sink.expect("engine not subscribed").emit_for(request, event);
    }
}

impl AudioEngine for FakeEngine {
    fn subscribe(&mut self, sink: EventSink) {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Subscribe);
        log.sink = Some(sink);
    }

    fn load(&mut self, url: &str, request: RequestId) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Load(url.to_string()));
        log.requests.push(request);
        if log.reject_loads {
            return Err(PlaybackError::Engine("unsupported url".to_string()));
        }
        Ok(())
    }

    fn play_pause(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::PlayPause);
        if log.fail_play {
            return Err(PlaybackError::Engine("autoplay blocked".to_string()));
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.log.borrow_mut().calls.push(Call::SetVolume(volume));
        Ok(())
    }

    fn seek_to(&mut self, fraction: f64) -> Result<()> {
        self.log.borrow_mut().calls.push(Call::SeekTo(fraction));
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.log.borrow().duration
    }

    fn destroy(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Destroy);
        if log.fail_destroy {
            return Err(PlaybackError::Destroy("already detached".to_string()));
        }
        Ok(())
    }
}

/// Factory handing out a prepared fake engine
pub struct FakeFactory {
    pub engine: FakeEngine,
    pub created_with: RefCell<Option<WaveformOptions>>,
}

impl FakeFactory {
    pub fn new(engine: FakeEngine) -> Self {
        Self {
            engine,
            created_with: RefCell::new(None),
        }
    }
}

impl EngineFactory for FakeFactory {
    type Container = str;

    fn create(&self, _container: &str, options: &WaveformOptions) -> Result<Box<dyn AudioEngine>> {
        *self.created_with.borrow_mut() = Some(options.clone());
        Ok(self.engine.boxed())
    }
}

/// Catalog with tracks A, B, C
pub fn abc_catalog() -> TrackCatalog {
    TrackCatalog::new(vec![
        Track::new("/a.mp3", "A", 1).with_cover("/a.png"),
        Track::new("/b.mp3", "B", 2).with_cover("/b.png"),
        Track::new("/c.mp3", "C", 3),
    ])
    .unwrap()
}
