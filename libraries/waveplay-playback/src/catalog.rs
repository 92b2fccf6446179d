//! Static track catalog

use crate::error::{PlaybackError, Result};
use crate::types::Track;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of playable tracks
///
/// Provided by the host and never mutated by the coordinator. URLs are
/// unique because the selector finds the current track by URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Track>", into = "Vec<Track>")]
pub struct TrackCatalog {
    tracks: Vec<Track>,
}

impl TrackCatalog {
    /// Build a catalog, rejecting duplicate URLs
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(track.url.as_str()) {
                return Err(PlaybackError::InvalidCatalog(format!(
                    "duplicate track url: {}",
                    track.url
                )));
            }
        }

        Ok(Self { tracks })
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    /// Index of the track with `url`
    pub fn position_of(&self, url: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.url == url)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl TryFrom<Vec<Track>> for TrackCatalog {
    type Error = PlaybackError;

    fn try_from(tracks: Vec<Track>) -> Result<Self> {
        Self::new(tracks)
    }
}

impl From<TrackCatalog> for Vec<Track> {
    fn from(catalog: TrackCatalog) -> Self {
        catalog.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks() -> Vec<Track> {
        vec![
            Track::new("/a.mp3", "A", 1),
            Track::new("/b.mp3", "B", 2),
            Track::new("/c.mp3", "C", 3),
        ]
    }

    #[test]
    fn lookup_by_url() {
        let catalog = TrackCatalog::new(tracks()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.position_of("/b.mp3"), Some(1));
        assert_eq!(catalog.position_of("/missing.mp3"), None);
        assert_eq!(catalog.first().unwrap().title, "A");
    }

    #[test]
    fn duplicate_urls_are_rejected() {
        let mut list = tracks();
        list.push(Track::new("/a.mp3", "A again", 4));

        let err = TrackCatalog::new(list).unwrap_err();
        assert_eq!(
            err,
            PlaybackError::InvalidCatalog("duplicate track url: /a.mp3".to_string())
        );
    }

    #[test]
    fn deserializes_from_list() {
        let json = r#"[
            {"url": "/a.mp3", "title": "A", "cover": "/cover.png", "number": 1},
            {"url": "/b.mp3", "title": "B", "number": 2}
        ]"#;

        let catalog: TrackCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().cover.as_deref(), Some("/cover.png"));
        assert!(catalog.get(1).unwrap().cover.is_none());

        let dup = r#"[{"url": "/a.mp3", "title": "A", "number": 1},
                      {"url": "/a.mp3", "title": "A", "number": 2}]"#;
        assert!(serde_json::from_str::<TrackCatalog>(dup).is_err());
    }
}
