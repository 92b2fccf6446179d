//! Core types for playback coordination

use serde::{Deserialize, Serialize};

/// One playable catalog entry
///
/// Immutable and identified by `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Audio location handed to the engine
    pub url: String,

    /// Display title
    pub title: String,

    /// Cover image location (optional)
    #[serde(default)]
    pub cover: Option<String>,

    /// Ordinal shown next to the title
    pub number: u32,
}

impl Track {
    /// Create a track without cover art
    pub fn new(url: impl Into<String>, title: impl Into<String>, number: u32) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            cover: None,
            number,
        }
    }

    /// Attach cover art
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }
}

/// Observable playback snapshot
///
/// Owned by the coordinator and replaced as a whole on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub is_playing: bool,

    /// Track length in seconds (0 while unknown)
    pub duration: f64,

    /// Playback position in seconds
    pub current_time: f64,

    pub is_loading: bool,

    /// Last failure, displayed instead of the waveform
    pub error: Option<String>,

    /// Stored volume in [0, 1], kept while muted
    pub volume: f32,

    pub is_muted: bool,

    /// Most recently requested track
    pub audio_url: Option<String>,

    pub title: Option<String>,

    pub cover: Option<String>,
}

impl PlaybackState {
    /// Seed state for a freshly mounted coordinator
    pub fn seeded(config: &PlayerConfig) -> Self {
        let track = config.default_track.as_ref();
        Self {
            volume: config.initial_volume.clamp(0.0, 1.0),
            audio_url: track.map(|t| t.url.clone()),
            title: track.map(|t| t.title.clone()),
            cover: track.and_then(|t| t.cover.clone()),
            ..Self::default()
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            duration: 0.0,
            current_time: 0.0,
            is_loading: false,
            error: None,
            volume: 1.0,
            is_muted: false,
            audio_url: None,
            title: None,
            cover: None,
        }
    }
}

/// Appearance options passed to the engine when it is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformOptions {
    /// Waveform height in pixels (default: 128)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Scale peaks to the full height (default: true)
    #[serde(default = "default_true")]
    pub normalize: bool,

    /// Allow click-to-seek on the waveform (default: true)
    #[serde(default = "default_true")]
    pub interact: bool,

    #[serde(default = "default_wave_color")]
    pub wave_color: String,

    /// Played-region colour (falls back to `wave_color`)
    #[serde(default)]
    pub progress_color: Option<String>,

    /// Cursor colour (falls back to `wave_color`)
    #[serde(default)]
    pub cursor_color: Option<String>,
}

impl WaveformOptions {
    pub fn progress_color(&self) -> &str {
        self.progress_color.as_deref().unwrap_or(&self.wave_color)
    }

    pub fn cursor_color(&self) -> &str {
        self.cursor_color.as_deref().unwrap_or(&self.wave_color)
    }
}

impl Default for WaveformOptions {
    fn default() -> Self {
        Self {
            height: default_height(),
            normalize: true,
            interact: true,
            wave_color: default_wave_color(),
            progress_color: None,
            cursor_color: None,
        }
    }
}

/// Configuration for the playback coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f32,

    /// Volume restored by unmute when the stored volume is 0 (default: 0.5)
    #[serde(default = "default_unmute_fallback_volume")]
    pub unmute_fallback_volume: f32,

    /// Track loaded as soon as the first engine registers
    #[serde(default)]
    pub default_track: Option<Track>,

    /// Cover shown when neither the snapshot nor the catalog has one
    #[serde(default = "default_cover")]
    pub default_cover: String,

    #[serde(default)]
    pub waveform: WaveformOptions,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
            unmute_fallback_volume: default_unmute_fallback_volume(),
            default_track: None,
            default_cover: default_cover(),
            waveform: WaveformOptions::default(),
        }
    }
}

fn default_height() -> u32 {
    128
}

fn default_true() -> bool {
    true
}

fn default_wave_color() -> String {
    "#233473".to_string()
}

fn default_initial_volume() -> f32 {
    1.0
}

fn default_unmute_fallback_volume() -> f32 {
    0.5
}

fn default_cover() -> String {
    "/cover.png".to_string()
}
