//! WASM bindings for waveplay-playback
//!
//! Lets a browser page drive the coordinator with a JavaScript waveform
//! engine (wavesurfer-style `on`/`load`/`playPause` API).

#[cfg(feature = "wasm")]
pub mod types;

#[cfg(feature = "wasm")]
pub mod engine;

#[cfg(feature = "wasm")]
pub mod coordinator;

#[cfg(feature = "wasm")]
pub use coordinator::WasmPlaybackCoordinator;

#[cfg(feature = "wasm")]
pub use engine::{JsAudioEngine, JsEngineFactory};
