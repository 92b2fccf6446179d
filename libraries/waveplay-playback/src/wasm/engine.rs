//! JavaScript engine adapter

use super::types::{describe, to_js, EngineOptions};
use crate::{
    AudioEngine, EngineEvent, EngineFactory, EventSink, PlaybackError, RequestId, Result,
    WaveformOptions,
};
use js_sys::{Function, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Engine events the adapter listens for
const EVENTS: [&str; 7] = [
    "error",
    "play",
    "pause",
    "finish",
    "timeupdate",
    "ready",
    "loading",
];

/// Called after every delivered event so the owner can pump
pub type Notifier = Rc<dyn Fn()>;

/// [`AudioEngine`] backed by a JS engine instance
///
/// The instance must expose `on(event, cb)`, `load(url)`, `playPause()`,
/// `setVolume(v)`, `seekTo(fraction)`, `getDuration()` and `destroy()`.
/// JS engines do not attribute events to a load, so events are emitted
/// untagged.
pub struct JsAudioEngine {
    instance: JsValue,

    // Kept alive until destroy; JS holds references to them
    listeners: Vec<Closure<dyn FnMut(JsValue)>>,
    unsubscribers: Vec<Function>,

    notifier: Option<Notifier>,
}

impl JsAudioEngine {
    pub fn new(instance: JsValue) -> Self {
        Self {
            instance,
            listeners: Vec::new(),
            unsubscribers: Vec::new(),
            notifier: None,
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn method(&self, name: &str) -> Result<Function> {
        Reflect::get(&self.instance, &JsValue::from_str(name))
            .map_err(|e| PlaybackError::Engine(describe(&e)))?
            .dyn_into::<Function>()
            .map_err(|_| PlaybackError::Engine(format!("engine has no `{name}` method")))
    }

    fn call0(&self, name: &str) -> Result<JsValue> {
        self.method(name)?
            .call0(&self.instance)
            .map_err(|e| PlaybackError::Engine(describe(&e)))
    }

    fn call1(&self, name: &str, arg: &JsValue) -> Result<JsValue> {
        self.method(name)?
            .call1(&self.instance, arg)
            .map_err(|e| PlaybackError::Engine(describe(&e)))
    }
}

/// Map a JS callback invocation onto an engine event
fn translate(name: &str, arg: &JsValue) -> Option<EngineEvent> {
    match name {
        "error" => Some(EngineEvent::Error(describe(arg))),
        "play" => Some(EngineEvent::Play),
        "pause" => Some(EngineEvent::Pause),
        "finish" => Some(EngineEvent::Finish),
        "timeupdate" => Some(EngineEvent::TimeUpdate(arg.as_f64().unwrap_or(0.0))),
        // NaN makes the coordinator ask getDuration()
        "ready" => Some(EngineEvent::Ready {
            duration: arg.as_f64().unwrap_or(f64::NAN),
        }),
        "loading" => Some(EngineEvent::Loading),
        _ => None,
    }
}

impl AudioEngine for JsAudioEngine {
    fn subscribe(&mut self, sink: EventSink) {
        let on = match self.method("on") {
            Ok(on) => on,
            Err(err) => {
                web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
                return;
            }
        };

        for name in EVENTS {
            let sink = sink.clone();
            let notifier = self.notifier.clone();
            let listener = Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| {
                if let Some(event) = translate(name, &arg) {
                    sink.emit(event);
                    if let Some(notify) = &notifier {
                        notify();
                    }
                }
            });

            match on.call2(
                &self.instance,
                &JsValue::from_str(name),
                listener.as_ref().unchecked_ref(),
            ) {
                Ok(unsubscribe) => {
                    if let Ok(unsubscribe) = unsubscribe.dyn_into::<Function>() {
                        self.unsubscribers.push(unsubscribe);
                    }
                }
                Err(err) => web_sys::console::error_1(&err),
            }

            self.listeners.push(listener);
        }
    }

    fn load(&mut self, url: &str, _request: RequestId) -> Result<()> {
        self.call1("load", &JsValue::from_str(url)).map(|_| ())
    }

    fn play_pause(&mut self) -> Result<()> {
        self.call0("playPause").map(|_| ())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.call1("setVolume", &JsValue::from_f64(f64::from(volume)))
            .map(|_| ())
    }

    fn seek_to(&mut self, fraction: f64) -> Result<()> {
        self.call1("seekTo", &JsValue::from_f64(fraction)).map(|_| ())
    }

    fn duration(&self) -> f64 {
        self.call0("getDuration")
            .ok()
            .and_then(|d| d.as_f64())
            .filter(|d| d.is_finite())
            .unwrap_or(0.0)
    }

    fn destroy(&mut self) -> Result<()> {
        for unsubscribe in self.unsubscribers.drain(..) {
            unsubscribe.call0(&JsValue::NULL).ok();
        }

        let result = self.call0("destroy").map(|_| ());
        self.listeners.clear();
        result.map_err(|e| PlaybackError::Destroy(e.to_string()))
    }
}

/// Creates [`JsAudioEngine`]s through a JS `create(container, options)` function
pub struct JsEngineFactory {
    create: Function,
    notifier: Option<Notifier>,
}

impl JsEngineFactory {
    pub fn new(create: Function, notifier: Option<Notifier>) -> Self {
        Self { create, notifier }
    }
}

impl EngineFactory for JsEngineFactory {
    type Container = JsValue;

    fn create(
        &self,
        container: &JsValue,
        options: &WaveformOptions,
    ) -> Result<Box<dyn AudioEngine>> {
        let options = to_js(&EngineOptions::from(options));
        let instance = self
            .create
            .call2(&JsValue::NULL, container, &options)
            .map_err(|e| PlaybackError::Engine(describe(&e)))?;

        if instance.is_null() || instance.is_undefined() {
            return Err(PlaybackError::Engine(
                "create() returned no engine".to_string(),
            ));
        }

        let mut engine = JsAudioEngine::new(instance);
        if let Some(notifier) = &self.notifier {
            engine = engine.with_notifier(notifier.clone());
        }
        Ok(Box::new(engine))
    }
}
