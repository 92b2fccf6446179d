//! Waveplay - Playback Coordination
//!
//! Keeps one external audio engine (waveform renderer + player) in sync with
//! the UI that drives it.
//!
//! This crate provides:
//! - A coordinator owning at most one engine handle at a time
//! - An event reducer turning engine lifecycle events into snapshots
//! - Volume and mute handling that survives engine swaps
//! - A static track catalog and a prev/current/next selector window
//! - Transport bar and waveform overlay view-models
//! - WASM bindings for browser engines (feature `wasm`)
//!
//! # Architecture
//!
//! The engine is a trait object supplied by the platform. It receives
//! commands directly and reports back through an [`EventSink`]; the host calls
//! [`PlaybackCoordinator::pump`] to fold queued events into the snapshot.
//! Events from a replaced engine, and tagged events from a superseded load,
//! never reach the snapshot.
//!
//! # Example
//!
//! ```rust
//! use waveplay_playback::{
//!     AudioEngine, EngineEvent, EventSink, PlaybackCoordinator, PlayerConfig, RequestId, Result,
//! };
//!
//! struct SilentEngine {
//!     sink: Option<EventSink>,
//! }
//!
//! impl AudioEngine for SilentEngine {
//!     fn subscribe(&mut self, sink: EventSink) {
//!         self.sink = Some(sink);
//!     }
//!
//!     fn load(&mut self, _url: &str, request: RequestId) -> Result<()> {
//!         if let Some(sink) = &self.sink {
//!             sink.emit_for(request, EngineEvent::Loading);
//!             sink.emit_for(request, EngineEvent::Ready { duration: 90.0 });
//!         }
//!         Ok(())
//!     }
//!
//!     fn play_pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: f32) -> Result<()> { Ok(()) }
//!     fn seek_to(&mut self, _fraction: f64) -> Result<()> { Ok(()) }
//!     fn duration(&self) -> f64 { 90.0 }
//!     fn destroy(&mut self) -> Result<()> { Ok(()) }
//! }
//!
//! let mut coordinator = PlaybackCoordinator::new(PlayerConfig::default());
//! coordinator.register_engine(Some(Box::new(SilentEngine { sink: None })));
//! coordinator.load_track("/song.mp3", Some("Song".to_string()), None);
//! assert!(coordinator.state().is_loading);
//!
//! coordinator.pump();
//! assert!(!coordinator.state().is_loading);
//! assert_eq!(coordinator.state().duration, 90.0);
//! ```

mod catalog;
mod coordinator;
mod engine;
mod error;
pub mod events;
pub mod presentation;
mod selector;
mod surface;
pub mod types;
mod volume;

pub mod wasm;

// Public exports
pub use catalog::TrackCatalog;
pub use coordinator::PlaybackCoordinator;
pub use engine::{AudioEngine, EngineEvent, EngineFactory, EventSink, HandleId, RequestId};
pub use error::{PlaybackError, Result};
pub use presentation::{format_time, PlayButton, TransportView, VolumeIcon, WaveformOverlay};
pub use selector::{TrackSelector, WindowItem, WindowSlot};
pub use surface::PlayerSurface;
pub use types::{PlaybackState, PlayerConfig, Track, WaveformOptions};
pub use volume::Volume;
