//! Track selector sliding window
//!
//! Shows the previous, current and next catalog entries. The current index
//! is derived from the snapshot's `audio_url`, never from the clicked index,
//! so a selection that fails to load does not move the window.

use crate::catalog::TrackCatalog;
use crate::coordinator::PlaybackCoordinator;
use crate::types::Track;
use serde::Serialize;
use tracing::debug;

/// Position of an item inside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSlot {
    Prev,
    Current,
    Next,
}

/// One rendered selector entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowItem<'a> {
    pub slot: WindowSlot,

    /// Catalog index issued when the item is selected
    pub index: usize,

    pub track: &'a Track,

    /// Whether this track is the one the snapshot points at
    pub is_selected: bool,
}

impl WindowItem<'_> {
    /// Zero-padded ordinal, e.g. "01"
    pub fn label(&self) -> String {
        format!("{:02}", self.track.number)
    }
}

/// Sliding window over a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSelector {
    current_index: usize,
}

impl TrackSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `audio_url` if it is in the catalog, else at the first track
    pub fn for_url(catalog: &TrackCatalog, audio_url: Option<&str>) -> Self {
        let mut selector = Self::new();
        selector.sync(catalog, audio_url);
        selector
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Re-derive the current index from the snapshot's `audio_url`
    ///
    /// Unknown URLs leave the index where it was. Returns true if it moved.
    pub fn sync(&mut self, catalog: &TrackCatalog, audio_url: Option<&str>) -> bool {
        match audio_url.and_then(|url| catalog.position_of(url)) {
            Some(index) if index != self.current_index => {
                debug!(from = self.current_index, to = index, "Selector moved");
                self.current_index = index;
                true
            }
            _ => false,
        }
    }

    /// Items to render, ordered next, current, prev
    ///
    /// Missing neighbours are left out; an empty catalog renders nothing.
    pub fn window<'a>(&self, catalog: &'a TrackCatalog, audio_url: Option<&str>) -> Vec<WindowItem<'a>> {
        let Some(current) = catalog.get(self.current_index) else {
            return Vec::new();
        };

        let item = |slot, index, track: &'a Track| WindowItem {
            slot,
            index,
            track,
            is_selected: audio_url == Some(track.url.as_str()),
        };

        let mut items = Vec::with_capacity(3);
        if let Some(next) = catalog.get(self.current_index + 1) {
            items.push(item(WindowSlot::Next, self.current_index + 1, next));
        }
        items.push(item(WindowSlot::Current, self.current_index, current));
        if let Some(prev_index) = self.current_index.checked_sub(1) {
            if let Some(prev) = catalog.get(prev_index) {
                items.push(item(WindowSlot::Prev, prev_index, prev));
            }
        }

        items
    }

    /// Ask the coordinator to load the track at `index`
    ///
    /// The window follows once the snapshot's `audio_url` changes and
    /// [`Self::sync`] runs. Returns false for an index outside the catalog.
    pub fn select(
        &self,
        catalog: &TrackCatalog,
        index: usize,
        coordinator: &mut PlaybackCoordinator,
    ) -> bool {
        let Some(track) = catalog.get(index) else {
            return false;
        };

        coordinator.load_track(track.url.clone(), Some(track.title.clone()), track.cover.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: u32) -> TrackCatalog {
        TrackCatalog::new(
            (1..=n)
                .map(|i| Track::new(format!("/{i}.mp3"), format!("Track {i}"), i))
                .collect(),
        )
        .unwrap()
    }

    fn slots(items: &[WindowItem<'_>]) -> Vec<(WindowSlot, usize)> {
        items.iter().map(|i| (i.slot, i.index)).collect()
    }

    #[test]
    fn middle_has_both_neighbours() {
        let catalog = catalog(3);
        let selector = TrackSelector::for_url(&catalog, Some("/2.mp3"));

        let items = selector.window(&catalog, Some("/2.mp3"));
        assert_eq!(
            slots(&items),
            vec![
                (WindowSlot::Next, 2),
                (WindowSlot::Current, 1),
                (WindowSlot::Prev, 0)
            ]
        );
        assert!(items[1].is_selected);
        assert!(!items[0].is_selected);
    }

    #[test]
    fn edges_have_no_wraparound() {
        let catalog = catalog(3);

        let first = TrackSelector::for_url(&catalog, Some("/1.mp3"));
        assert_eq!(
            slots(&first.window(&catalog, None)),
            vec![(WindowSlot::Next, 1), (WindowSlot::Current, 0)]
        );

        let last = TrackSelector::for_url(&catalog, Some("/3.mp3"));
        assert_eq!(
            slots(&last.window(&catalog, None)),
            vec![(WindowSlot::Current, 2), (WindowSlot::Prev, 1)]
        );
    }

    #[test]
    fn single_and_empty_catalogs() {
        let one = catalog(1);
        let selector = TrackSelector::new();
        assert_eq!(slots(&selector.window(&one, None)), vec![(WindowSlot::Current, 0)]);

        let empty = TrackCatalog::default();
        assert!(selector.window(&empty, None).is_empty());
    }

    #[test]
    fn unknown_url_keeps_index() {
        let catalog = catalog(3);
        let mut selector = TrackSelector::for_url(&catalog, Some("/3.mp3"));

        assert!(!selector.sync(&catalog, Some("/elsewhere.mp3")));
        assert!(!selector.sync(&catalog, None));
        assert_eq!(selector.current_index(), 2);

        assert!(selector.sync(&catalog, Some("/1.mp3")));
        assert_eq!(selector.current_index(), 0);
    }

    #[test]
    fn labels_are_zero_padded() {
        let catalog = catalog(3);
        let selector = TrackSelector::new();
        let items = selector.window(&catalog, None);
        assert_eq!(items[1].label(), "01");
        assert_eq!(items[0].label(), "02");
    }

    #[test]
    fn select_without_engine_changes_nothing() {
        let catalog = catalog(3);
        let selector = TrackSelector::new();
        let mut coordinator = PlaybackCoordinator::default();

        assert!(selector.select(&catalog, 1, &mut coordinator));
        assert!(coordinator.state().audio_url.is_none());
        assert!(!selector.select(&catalog, 9, &mut coordinator));
    }
}
