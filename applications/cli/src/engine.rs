/// Simulated audio engine
///
/// Stands in for the browser waveform engine: loads finish on the next tick,
/// playback advances with ticks, and URLs outside the catalog fail.
use crate::config::SimulationSettings;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;
use waveplay_playback::{
    AudioEngine, EngineEvent, EngineFactory, EventSink, PlaybackError, RequestId, Result,
    TrackCatalog, WaveformOptions,
};

#[derive(Debug, Default)]
struct SimState {
    sink: Option<EventSink>,
    durations: HashMap<String, f64>,
    pending: Option<(String, RequestId)>,
    duration: Option<f64>,
    position: f64,
    playing: bool,
    volume: f32,
    destroyed: bool,
}

impl SimState {
    fn emit(&self, event: EngineEvent) {
        if let Some(sink) = &self.sink {
            sink.emit(event);
        }
    }

    fn emit_for(&self, request: RequestId, event: EngineEvent) {
        if let Some(sink) = &self.sink {
            sink.emit_for(request, event);
        }
    }
}

/// Engine whose clock is driven by [`SimulatedEngine::tick`]
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    inner: Rc<RefCell<SimState>>,
}

impl SimulatedEngine {
    pub fn new(catalog: &TrackCatalog, settings: &SimulationSettings) -> Self {
        let durations = catalog
            .tracks()
            .iter()
            .map(|t| (t.url.clone(), settings.duration_of(&t.url)))
            .collect();

        Self {
            inner: Rc::new(RefCell::new(SimState {
                durations,
                volume: 1.0,
                ..Default::default()
            })),
        }
    }

    /// Advance the clock by `seconds`
    ///
    /// Completes a pending load first, then moves the playhead.
    pub fn tick(&self, seconds: f64) {
        let mut sim = self.inner.borrow_mut();
        if sim.destroyed {
            return;
        }

        if let Some((url, request)) = sim.pending.take() {
            match sim.durations.get(&url).copied() {
                Some(duration) => {
                    sim.duration = Some(duration);
                    sim.emit_for(request, EngineEvent::Ready { duration });
                }
                None => {
                    sim.emit_for(request, EngineEvent::Error(format!("HTTP 404: {url}")));
                }
            }
        }

        let Some(duration) = sim.duration else {
            return;
        };
        if !sim.playing || seconds <= 0.0 {
            return;
        }

        sim.position = (sim.position + seconds).min(duration);
        sim.emit(EngineEvent::TimeUpdate(sim.position));
        if sim.position >= duration {
            sim.playing = false;
            sim.emit(EngineEvent::Finish);
        }
    }

    /// Volume the engine currently outputs
    pub fn volume(&self) -> f32 {
        self.inner.borrow().volume
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().destroyed
    }
}

impl AudioEngine for SimulatedEngine {
    fn subscribe(&mut self, sink: EventSink) {
        let mut sim = self.inner.borrow_mut();
        debug!(handle = %sink.handle(), "Simulated engine subscribed");
        sim.sink = Some(sink);
        sim.destroyed = false;
    }

    fn load(&mut self, url: &str, request: RequestId) -> Result<()> {
        let mut sim = self.inner.borrow_mut();
        if sim.destroyed {
            return Err(PlaybackError::Engine("engine destroyed".to_string()));
        }
        if url.trim().is_empty() {
            return Err(PlaybackError::LoadRejected {
                url: url.to_string(),
            });
        }

        if sim.playing {
            sim.playing = false;
            sim.emit(EngineEvent::Pause);
        }
        sim.duration = None;
        sim.position = 0.0;
        sim.pending = Some((url.to_string(), request));
        sim.emit_for(request, EngineEvent::TimeUpdate(0.0));
        sim.emit_for(request, EngineEvent::Loading);
        Ok(())
    }

    fn play_pause(&mut self) -> Result<()> {
        let mut sim = self.inner.borrow_mut();
        if sim.duration.is_none() {
            return Ok(());
        }

        sim.playing = !sim.playing;
        let event = if sim.playing {
            EngineEvent::Play
        } else {
            EngineEvent::Pause
        };
        sim.emit(event);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.inner.borrow_mut().volume = volume;
        Ok(())
    }

    fn seek_to(&mut self, fraction: f64) -> Result<()> {
        let mut sim = self.inner.borrow_mut();
        if let Some(duration) = sim.duration {
            sim.position = duration * fraction;
            sim.emit(EngineEvent::TimeUpdate(sim.position));
        }
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.inner.borrow().duration.unwrap_or(0.0)
    }

    fn destroy(&mut self) -> Result<()> {
        let mut sim = self.inner.borrow_mut();
        sim.destroyed = true;
        sim.sink = None;
        sim.playing = false;
        sim.pending = None;
        sim.duration = None;
        sim.position = 0.0;
        Ok(())
    }
}

/// Hands out the one simulated engine
///
/// The container is a CSS-style selector such as `#waveform`; it is only
/// logged, since the simulated engine draws nothing.
pub struct SimulatedFactory {
    engine: SimulatedEngine,
}

impl SimulatedFactory {
    pub fn new(engine: SimulatedEngine) -> Self {
        Self { engine }
    }
}

impl EngineFactory for SimulatedFactory {
    type Container = str;

    fn create(&self, container: &str, options: &WaveformOptions) -> Result<Box<dyn AudioEngine>> {
        debug!(container, height = options.height, "Creating simulated engine");
        Ok(Box::new(self.engine.clone()))
    }
}
