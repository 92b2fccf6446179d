/// Scripted playback session on the simulated engine
use crate::config::HostConfig;
use crate::engine::{SimulatedEngine, SimulatedFactory};
use crate::error::{CliError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};
use waveplay_playback::{
    PlaybackCoordinator, PlaybackState, PlayerSurface, TrackCatalog, TrackSelector,
    TransportView, WaveformOverlay, WindowItem,
};

/// Container the simulated engine is mounted into
const CONTAINER: &str = "#waveform";

/// One scripted user action
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Load catalog track `n` directly
    Load(usize),
    /// Load an arbitrary URL (not necessarily in the catalog)
    Url(String),
    /// Click catalog track `n` in the selector window
    Select(usize),
    Toggle,
    Volume(f32),
    Mute,
    Seek(f64),
    /// Advance the simulated clock
    Tick(f64),
    /// Unmount the engine
    Drop,
    /// Mount a fresh engine
    Mount,
}

impl FromStr for Step {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        let value = |what: &str| {
            arg.filter(|a| !a.is_empty())
                .ok_or_else(|| CliError::step(s, format!("missing {what}")))
        };
        let number = |what: &str| -> Result<f64> {
            let value: f64 = value(what)?
                .parse()
                .map_err(|_| CliError::step(s, format!("{what} must be a number")))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(CliError::step(s, format!("{what} must be finite")))
            }
        };
        let index = || -> Result<usize> {
            value("index")?
                .parse()
                .map_err(|_| CliError::step(s, "index must be a non-negative integer"))
        };

        match name {
            "load" => Ok(Step::Load(index()?)),
            "url" => Ok(Step::Url(value("url")?.to_string())),
            "select" => Ok(Step::Select(index()?)),
            "toggle" => Ok(Step::Toggle),
            "volume" => Ok(Step::Volume(number("volume")? as f32)),
            "mute" => Ok(Step::Mute),
            "seek" => Ok(Step::Seek(number("seconds")?)),
            "tick" => Ok(Step::Tick(number("seconds")?)),
            "drop" => Ok(Step::Drop),
            "mount" => Ok(Step::Mount),
            _ => Err(CliError::step(s, "unknown step")),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Load(n) => write!(f, "load:{n}"),
            Step::Url(url) => write!(f, "url:{url}"),
            Step::Select(n) => write!(f, "select:{n}"),
            Step::Toggle => write!(f, "toggle"),
            Step::Volume(v) => write!(f, "volume:{v}"),
            Step::Mute => write!(f, "mute"),
            Step::Seek(t) => write!(f, "seek:{t}"),
            Step::Tick(t) => write!(f, "tick:{t}"),
            Step::Drop => write!(f, "drop"),
            Step::Mount => write!(f, "mount"),
        }
    }
}

/// What the UI would show after a step
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub step: String,
    pub revision: u64,
    pub state: &'a PlaybackState,
    pub transport: Option<TransportView>,
    pub overlay: WaveformOverlay,
    pub cover: &'a str,
    pub window: Vec<WindowItem<'a>>,
}

/// Coordinator, selector and simulated engine wired together
#[derive(Debug)]
pub struct Session {
    catalog: TrackCatalog,
    coordinator: PlaybackCoordinator,
    selector: TrackSelector,
    surface: PlayerSurface,
    engine: SimulatedEngine,
}

impl Session {
    /// Build the session and mount the simulated engine
    ///
    /// Mounting loads the configured default track.
    pub fn start(config: &HostConfig) -> Result<Self> {
        let catalog = config.catalog()?;
        let coordinator = PlaybackCoordinator::new(config.player_config());
        let selector = TrackSelector::for_url(&catalog, coordinator.state().audio_url.as_deref());
        let surface = PlayerSurface::from_coordinator(&coordinator);
        let engine = SimulatedEngine::new(&catalog, &config.simulation);

        let mut session = Self {
            catalog,
            coordinator,
            selector,
            surface,
            engine,
        };
        session.mount()?;
        info!(tracks = session.catalog.len(), "Session started");
        Ok(session)
    }

    fn mount(&mut self) -> Result<()> {
        let factory = SimulatedFactory::new(self.engine.clone());
        self.surface.mount(&mut self.coordinator, &factory, CONTAINER)?;
        self.settle();
        Ok(())
    }

    /// Apply one step and fold the resulting engine events
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        debug!(%step, "Applying step");

        match step {
            Step::Load(index) => {
                let track = self
                    .catalog
                    .get(*index)
                    .ok_or_else(|| CliError::step(step.to_string(), "no such track"))?;
                self.coordinator.load_track(
                    track.url.clone(),
                    Some(track.title.clone()),
                    track.cover.clone(),
                );
            }
            Step::Url(url) => self.coordinator.load_track(url.clone(), None, None),
            Step::Select(index) => {
                let visible = self
                    .selector
                    .window(&self.catalog, self.coordinator.state().audio_url.as_deref())
                    .iter()
                    .any(|item| item.index == *index);
                if !visible {
                    return Err(CliError::step(step.to_string(), "track is not in the window"));
                }
                self.selector
                    .select(&self.catalog, *index, &mut self.coordinator);
            }
            Step::Toggle => self.coordinator.toggle_play_pause(),
            Step::Volume(volume) => self.coordinator.set_volume(*volume),
            Step::Mute => self.coordinator.toggle_mute(),
            Step::Seek(time) => self.coordinator.seek_to(*time),
            Step::Tick(seconds) => self.engine.tick(*seconds),
            Step::Drop => self.surface.unmount(&mut self.coordinator),
            Step::Mount => return self.mount(),
        }

        self.settle();
        Ok(())
    }

    fn settle(&mut self) {
        self.coordinator.pump();
        self.selector
            .sync(&self.catalog, self.coordinator.state().audio_url.as_deref());
    }

    /// Snapshot plus derived view-models
    pub fn report(&self, step: impl Into<String>) -> Report<'_> {
        let state = self.coordinator.state();
        let audio_url = state.audio_url.as_deref();

        Report {
            step: step.into(),
            revision: self.coordinator.revision(),
            state,
            transport: TransportView::from_state(state),
            overlay: self.surface.overlay(state),
            cover: self
                .surface
                .cover(state, self.catalog.get(self.selector.current_index())),
            window: self.selector.window(&self.catalog, audio_url),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        self.coordinator.state()
    }

    pub fn selector(&self) -> &TrackSelector {
        &self.selector
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &SimulatedEngine {
        &self.engine
    }
}
