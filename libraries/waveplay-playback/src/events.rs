//! Engine event reducer
//!
//! Maps one engine event onto the previous snapshot and returns the next one.
//! Pure, so the whole lifecycle table can be tested without an engine.

use crate::engine::EngineEvent;
use crate::error::PlaybackError;
use crate::types::PlaybackState;

/// Apply `event` to `state`
pub fn reduce(state: &PlaybackState, event: &EngineEvent) -> PlaybackState {
    let mut next = state.clone();

    match event {
        EngineEvent::Loading => {
            next.is_loading = true;
            next.error = None;
        }
        EngineEvent::Ready { duration } => {
            next.duration = non_negative(*duration);
            next.current_time = clamp_time(next.current_time, next.duration);
            next.is_loading = false;
            next.error = None;
        }
        EngineEvent::Play => next.is_playing = true,
        EngineEvent::Pause | EngineEvent::Finish => next.is_playing = false,
        EngineEvent::TimeUpdate(time) => {
            next.current_time = clamp_time(non_negative(*time), next.duration);
        }
        EngineEvent::Error(message) => {
            next.error = Some(PlaybackError::load(message.as_str()).to_string());
            next.is_loading = false;
        }
    }

    next
}

/// Keep the position inside the track once its length is known
fn clamp_time(time: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        time.min(duration)
    } else {
        time
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
