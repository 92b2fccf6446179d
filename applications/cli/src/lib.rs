//! Waveplay CLI - headless host for the playback coordinator
//!
//! Drives a [`waveplay_playback::PlaybackCoordinator`] against a simulated
//! engine so playback flows can be scripted and inspected from a terminal.

pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use config::HostConfig;
pub use engine::{SimulatedEngine, SimulatedFactory};
pub use error::{CliError, Result};
pub use session::{Report, Session, Step};
