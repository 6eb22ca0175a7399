//! In-memory map widget.

use std::collections::BTreeMap;

use flood_workspace_reference::Coordinates;

use crate::{MapWidget, MarkerHandle};

/// The widget's current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    /// Viewport center.
    pub center: Coordinates,
    /// Zoom level.
    pub zoom: u8,
}

/// A marker as the widget received it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    /// Marker position.
    pub position: Coordinates,
    /// Fill color.
    pub color: String,
    /// Popup content.
    pub popup: String,
}

/// A [`MapWidget`] that renders nothing and remembers everything.
///
/// Tracks live markers and the current viewport so callers can inspect
/// what a real map would be showing.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    next_handle: u64,
    live: BTreeMap<MarkerHandle, PlacedMarker>,
    view: Option<MapView>,
    removed: u64,
}

impl HeadlessMap {
    /// Creates an empty widget with no viewport set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers currently on the map, in placement order.
    pub fn live_markers(&self) -> impl Iterator<Item = &PlacedMarker> {
        self.live.values()
    }

    /// Number of markers currently on the map.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total markers removed over the widget's lifetime.
    #[must_use]
    pub const fn removed_count(&self) -> u64 {
        self.removed
    }

    /// The current viewport, if one has been set.
    #[must_use]
    pub const fn view(&self) -> Option<MapView> {
        self.view
    }
}

impl MapWidget for HeadlessMap {
    fn initialize(&mut self, center: Coordinates, zoom: u8) {
        log::trace!("map initialize center={center} zoom={zoom}");
        self.view = Some(MapView { center, zoom });
    }

    fn add_marker(&mut self, position: Coordinates, color: &str, popup: &str) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        log::trace!("map add_marker {handle:?} at {position} color={color}");
        self.live.insert(
            handle,
            PlacedMarker {
                position,
                color: color.to_string(),
                popup: popup.to_string(),
            },
        );
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if self.live.remove(&handle).is_some() {
            self.removed += 1;
            log::trace!("map remove_marker {handle:?}");
        }
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        log::trace!("map set_view center={center} zoom={zoom}");
        self.view = Some(MapView { center, zoom });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_removal_is_tracked() {
        let mut map = HeadlessMap::new();
        let here = Coordinates::new(1.0, 2.0);
        let a = map.add_marker(here, "#000", "a");
        let b = map.add_marker(here, "#000", "b");
        assert_ne!(a, b);

        map.remove_marker(a);
        map.remove_marker(a);
        assert_eq!(map.live_count(), 1);
        assert_eq!(map.removed_count(), 1);
        assert_eq!(map.live_markers().next().unwrap().popup, "b");
    }
}
