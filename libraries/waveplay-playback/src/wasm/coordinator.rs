//! WASM-compatible PlaybackCoordinator wrapper

use super::engine::{JsAudioEngine, JsEngineFactory, Notifier};
use super::types::to_js;
use crate::{PlaybackCoordinator, PlayerConfig, PlayerSurface, TransportView};
use js_sys::Function;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

/// State shared with the engine's event callbacks
struct Shared {
    coordinator: RefCell<PlaybackCoordinator>,
    on_state_change: RefCell<Option<Function>>,
    notified_revision: Cell<u64>,
}

impl Shared {
    /// Apply queued events and tell JS about a new snapshot
    ///
    /// The JS callback runs after the coordinator borrow is released, so it may
    /// call straight back into the coordinator. Events fired while a command is
    /// running are picked up when that command settles.
    fn settle(&self) {
        let snapshot = {
            let Ok(mut coordinator) = self.coordinator.try_borrow_mut() else {
                return;
            };
            coordinator.pump();

            let revision = coordinator.revision();
            if revision == self.notified_revision.get() {
                return;
            }
            self.notified_revision.set(revision);
            to_js(coordinator.state())
        };

        let callback = self.on_state_change.borrow().clone();
        if let Some(callback) = callback {
            callback.call1(&JsValue::NULL, &snapshot).ok();
        }
    }
}

/// WASM-compatible playback coordinator
///
/// This wraps the core PlaybackCoordinator with a JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmPlaybackCoordinator {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WasmPlaybackCoordinator {
    /// Create a coordinator; `config` is a `PlayerConfig` object or undefined
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlaybackCoordinator, JsValue> {
        #[cfg(feature = "wasm")]
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid player config: {}", e)))?
        };

        Ok(Self {
            shared: Rc::new(Shared {
                coordinator: RefCell::new(PlaybackCoordinator::new(config)),
                on_state_change: RefCell::new(None),
                notified_revision: Cell::new(0),
            }),
        })
    }

    // ===== Engine Lifecycle =====

    /// Register an existing engine instance, or release the current one with null
    #[wasm_bindgen(js_name = registerEngine)]
    pub fn register_engine(&self, instance: JsValue) {
        let engine = if instance.is_null() || instance.is_undefined() {
            None
        } else {
            let engine = JsAudioEngine::new(instance).with_notifier(self.notifier());
            Some(Box::new(engine) as Box<dyn crate::AudioEngine>)
        };

        self.shared.coordinator.borrow_mut().register_engine(engine);
        self.shared.settle();
    }

    /// Create an engine with `create(container, options)` unless one is registered
    pub fn mount(&self, create: Function, container: JsValue) -> Result<bool, JsValue> {
        let factory = JsEngineFactory::new(create, Some(self.notifier()));
        let mounted = {
            let mut coordinator = self.shared.coordinator.borrow_mut();
            let surface = PlayerSurface::from_coordinator(&coordinator);
            surface
                .mount(&mut coordinator, &factory, &container)
                .map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        self.shared.settle();
        Ok(mounted)
    }

    /// Release the engine
    pub fn unmount(&self) {
        self.register_engine(JsValue::NULL);
    }

    // ===== Playback Control =====

    #[wasm_bindgen(js_name = loadTrack)]
    pub fn load_track(&self, url: String, title: Option<String>, cover: Option<String>) {
        self.shared
            .coordinator
            .borrow_mut()
            .load_track(url, title, cover);
        self.shared.settle();
    }

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) {
        self.shared.coordinator.borrow_mut().toggle_play_pause();
        self.shared.settle();
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f32) {
        self.shared.coordinator.borrow_mut().set_volume(volume);
        self.shared.settle();
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.shared.coordinator.borrow_mut().toggle_mute();
        self.shared.settle();
    }

    /// Seek to position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&self, time: f64) {
        self.shared.coordinator.borrow_mut().seek_to(time);
        self.shared.settle();
    }

    // ===== State Queries =====

    /// Current snapshot as a plain object
    pub fn state(&self) -> JsValue {
        to_js(self.shared.coordinator.borrow().state())
    }

    /// Transport bar view-model, or null while nothing is loaded
    pub fn transport(&self) -> JsValue {
        let coordinator = self.shared.coordinator.borrow();
        match TransportView::from_state(coordinator.state()) {
            Some(view) => to_js(&view),
            None => JsValue::NULL,
        }
    }

    /// Waveform overlay view-model
    pub fn overlay(&self) -> JsValue {
        let coordinator = self.shared.coordinator.borrow();
        let surface = PlayerSurface::from_coordinator(&coordinator);
        to_js(&surface.overlay(coordinator.state()))
    }

    // ===== Event Listeners =====

    /// Register state change callback
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&self, callback: Function) {
        *self.shared.on_state_change.borrow_mut() = Some(callback);
    }

    // ===== Internal =====

    fn notifier(&self) -> Notifier {
        let shared: Weak<Shared> = Rc::downgrade(&self.shared);
        Rc::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.settle();
            }
        })
    }
}
