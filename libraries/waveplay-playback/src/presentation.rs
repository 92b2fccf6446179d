//! View-models for the transport bar
//!
//! Everything here is derived from a [`PlaybackState`] snapshot; rendering is
//! left to the host.

use crate::types::PlaybackState;
use serde::Serialize;

/// Title shown when the snapshot has none
pub const UNKNOWN_TITLE: &str = "Unknown track";

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Speaker icon next to the volume slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

impl VolumeIcon {
    pub fn for_state(state: &PlaybackState) -> Self {
        if state.is_muted || state.volume == 0.0 {
            Self::Muted
        } else if state.volume < 0.5 {
            Self::Low
        } else {
            Self::High
        }
    }
}

/// Glyph on the play button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayButton {
    Spinner,
    Play,
    Pause,
}

/// What covers the waveform area
///
/// An error hides the loading indicator even if loading never finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum WaveformOverlay {
    None,
    Loading,
    Error(String),
}

impl WaveformOverlay {
    pub fn for_state(state: &PlaybackState) -> Self {
        match &state.error {
            Some(message) => Self::Error(message.clone()),
            None if state.is_loading => Self::Loading,
            None => Self::None,
        }
    }
}

/// Transport bar contents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportView {
    pub title: String,
    pub cover: Option<String>,
    pub elapsed: String,
    pub total: String,
    pub play_button: PlayButton,
    /// Play/pause is disabled while loading or after an error
    pub play_enabled: bool,
    pub play_label: &'static str,
    pub volume_icon: VolumeIcon,
    pub mute_label: &'static str,
    /// Slider position; 0 while muted
    pub slider_value: f32,
}

impl TransportView {
    /// Build the transport bar, or `None` while no track has been requested
    pub fn from_state(state: &PlaybackState) -> Option<Self> {
        state.audio_url.as_ref()?;

        let play_button = if state.is_loading {
            PlayButton::Spinner
        } else if state.is_playing {
            PlayButton::Pause
        } else {
            PlayButton::Play
        };

        Some(Self {
            title: state
                .title
                .clone()
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            cover: state.cover.clone(),
            elapsed: format_time(state.current_time),
            total: format_time(state.duration),
            play_button,
            play_enabled: !state.is_loading && state.error.is_none(),
            play_label: if state.is_playing { "Pause" } else { "Play" },
            volume_icon: VolumeIcon::for_state(state),
            mute_label: if state.is_muted { "Unmute" } else { "Mute" },
            slider_value: if state.is_muted { 0.0 } else { state.volume },
        })
    }
}
