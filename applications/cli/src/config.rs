/// Host configuration
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use waveplay_playback::{PlayerConfig, Track, TrackCatalog};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "waveplay.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default = "default_tracks")]
    pub tracks: Vec<Track>,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// How the simulated engine behaves
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Duration reported for tracks without an explicit entry (seconds)
    #[serde(default = "default_duration")]
    pub default_duration: f64,

    /// Per-track durations
    #[serde(default)]
    pub tracks: Vec<SimulatedTrack>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatedTrack {
    pub url: String,
    pub duration: f64,
}

impl SimulationSettings {
    /// Duration the simulated engine reports for `url`
    pub fn duration_of(&self, url: &str) -> f64 {
        self.tracks
            .iter()
            .find(|t| t.url == url)
            .map(|t| t.duration)
            .unwrap_or(self.default_duration)
    }
}

impl HostConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `waveplay.toml` is used when
    /// present. Environment variables prefixed with `WAVEPLAY_` override file
    /// values, with `__` between nested keys (`WAVEPLAY_PLAYER__INITIAL_VOLUME`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("WAVEPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Catalog built from the configured tracks
    pub fn catalog(&self) -> Result<TrackCatalog> {
        Ok(TrackCatalog::new(self.tracks.clone())?)
    }

    /// Player configuration, defaulting to the first catalog track
    pub fn player_config(&self) -> PlayerConfig {
        let mut player = self.player.clone();
        if player.default_track.is_none() {
            player.default_track = self.tracks.first().cloned();
        }
        player
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            tracks: default_tracks(),
            simulation: SimulationSettings::default(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
            tracks: Vec::new(),
        }
    }
}

// Default values
fn default_tracks() -> Vec<Track> {
    vec![
        Track::new("/After the Message.mp3", "After the Message", 1).with_cover("/cover.png"),
        Track::new("/After the Message copy2.mp3", "After the Message copy2", 2)
            .with_cover("/cover.png"),
        Track::new("/After the Message copy.mp3", "After the Message copy", 3)
            .with_cover("/cover.png"),
    ]
}

fn default_duration() -> f64 {
    180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_ship_a_catalog() {
        let config = HostConfig::default();
        assert_eq!(config.catalog().unwrap().len(), 3);
        assert_eq!(
            config.player_config().default_track.unwrap().url,
            "/After the Message.mp3"
        );
        assert_eq!(config.simulation.duration_of("/anything.mp3"), 180.0);
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r##"
[player]
initial_volume = 0.4

[player.waveform]
height = 96
wave_color = "#233169"

[[tracks]]
url = "/One.mp3"
title = "One"
number = 1

[[tracks]]
url = "/Two.mp3"
title = "Two"
cover = "/two.png"
number = 2

[simulation]
default_duration = 60.0

[[simulation.tracks]]
url = "/Two.mp3"
duration = 95.5
"##
        )
        .unwrap();

        let config = HostConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.player.initial_volume, 0.4);
        assert_eq!(config.player.waveform.height, 96);
        assert_eq!(config.player.waveform.wave_color, "#233169");
        assert_eq!(config.player.unmute_fallback_volume, 0.5);

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().cover.as_deref(), Some("/two.png"));

        assert_eq!(config.simulation.duration_of("/Two.mp3"), 95.5);
        assert_eq!(config.simulation.duration_of("/One.mp3"), 60.0);
        assert_eq!(config.player_config().default_track.unwrap().url, "/One.mp3");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = HostConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }
}
