//! The owned set of markers currently on the map.

use flood_workspace_assessment_models::AssessmentSummary;
use flood_workspace_reference::{COUNTRY_CENTROID, LocationResolver};

use crate::marker::{Marker, MarkerDetail};
use crate::palette::band_color;
use crate::{CLOSE_ZOOM, DEFAULT_ZOOM, MapWidget, WIDE_ZOOM};

/// Owns the map widget and every marker placed on it.
///
/// Created once per workspace with [`Self::create`] and released with
/// [`Self::teardown`]. Nothing else holds marker handles, so after
/// [`Self::clear`] followed by `n` calls to [`Self::add`] exactly `n`
/// markers are live.
pub struct MarkerSet<W: MapWidget> {
    widget: W,
    resolver: &'static LocationResolver,
    markers: Vec<Marker>,
}

impl<W: MapWidget> MarkerSet<W> {
    /// Takes ownership of `widget` and centers it on the whole country.
    pub fn create(mut widget: W, resolver: &'static LocationResolver) -> Self {
        widget.initialize(COUNTRY_CENTROID, DEFAULT_ZOOM);
        Self {
            widget,
            resolver,
            markers: Vec::new(),
        }
    }

    /// Places a marker for `summary` and zooms in on it.
    pub fn add<S: AssessmentSummary + ?Sized>(&mut self, summary: &S) -> &Marker {
        let detail = MarkerDetail::from_summary(summary);
        let position = self.resolver.resolve(&detail.district);
        let color = band_color(detail.band);
        let handle = self
            .widget
            .add_marker(position, color, &detail.popup_html());

        log::debug!(
            "Added {} marker for {}, {} at {position}",
            detail.band,
            detail.district,
            detail.state
        );

        self.widget.set_view(position, CLOSE_ZOOM);
        self.markers.push(Marker {
            handle,
            position,
            color,
            detail,
        });
        &self.markers[self.markers.len() - 1]
    }

    /// Removes every marker from the map. Calling it on an empty set does
    /// nothing.
    pub fn clear(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        log::debug!("Clearing {} markers", self.markers.len());
        for marker in self.markers.drain(..) {
            self.widget.remove_marker(marker.handle);
        }
    }

    /// Replaces all markers with one per entry, in the given order, then
    /// centers on the first entry (the newest) at a wide zoom.
    ///
    /// An empty history leaves the current markers in place, so a result
    /// placed with [`Self::add`] stays visible until the history lists it.
    /// Runs without yielding, so the set is never observed half-rebuilt.
    pub fn reconcile<S: AssessmentSummary>(&mut self, entries: &[S]) {
        if entries.is_empty() {
            log::debug!("Empty history; keeping {} markers", self.markers.len());
            return;
        }
        self.clear();
        for entry in entries {
            self.add(entry);
        }
        if let Some(newest) = entries.first() {
            let center = self.resolver.resolve(newest.district());
            self.widget.set_view(center, WIDE_ZOOM);
        }
    }

    /// Markers currently on the map, in the order they were added.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of live markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no markers are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Read access to the underlying widget.
    #[must_use]
    pub const fn widget(&self) -> &W {
        &self.widget
    }

    /// Removes every marker and hands the widget back.
    #[must_use]
    pub fn teardown(mut self) -> W {
        self.clear();
        self.widget
    }
}

#[cfg(test)]
mod tests {
    use flood_workspace_assessment_models::HistoryEntry;
    use flood_workspace_reference::Coordinates;

    use super::*;
    use crate::HeadlessMap;

    fn entry(district: &str, band: &str) -> HistoryEntry {
        HistoryEntry {
            timestamp: "2025-07-01T06:30:00+00:00".to_string(),
            district: district.to_string(),
            state: "Somewhere".to_string(),
            score: 0.5,
            band: Some(band.to_string()),
            confidence: 80.0,
        }
    }

    fn marker_set() -> MarkerSet<HeadlessMap> {
        MarkerSet::create(HeadlessMap::new(), LocationResolver::embedded())
    }

    #[test]
    fn create_centers_on_country() {
        let set = marker_set();
        let view = set.widget().view().unwrap();
        assert_eq!(view.center, COUNTRY_CENTROID);
        assert_eq!(view.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn add_places_colored_marker_and_zooms_in() {
        let mut set = marker_set();
        let marker = set.add(&entry("Pune", "high")).clone();
        assert_eq!(marker.position, Coordinates::new(18.5204, 73.8567));
        assert_eq!(marker.color, "#f45b69");

        let view = set.widget().view().unwrap();
        assert_eq!(view.center, marker.position);
        assert_eq!(view.zoom, CLOSE_ZOOM);
    }

    #[test]
    fn unknown_district_lands_on_country_centroid() {
        let mut set = marker_set();
        let marker = set.add(&entry("Nowhereville", "low"));
        assert_eq!(marker.position, COUNTRY_CENTROID);
    }

    #[test]
    fn clear_then_add_yields_exact_count_in_order() {
        let mut set = marker_set();
        for district in ["Pune", "Mumbai", "Nagpur", "Thane"] {
            set.add(&entry(district, "low"));
        }

        set.clear();
        set.add(&entry("Kochi", "severe"));
        set.add(&entry("Patna", "moderate"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.markers()[0].detail.district, "Kochi");
        assert_eq!(set.markers()[1].detail.district, "Patna");
        assert_eq!(set.widget().live_count(), 2);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut set = marker_set();
        set.add(&entry("Pune", "low"));
        set.clear();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.widget().live_count(), 0);
    }

    #[test]
    fn reconcile_does_not_accumulate() {
        let mut set = marker_set();
        let history = vec![entry("Kochi", "severe"), entry("Pune", "high")];

        set.reconcile(&history);
        set.reconcile(&history);

        assert_eq!(set.len(), 2);
        assert_eq!(set.widget().live_count(), 2);

        let view = set.widget().view().unwrap();
        assert_eq!(view.center, Coordinates::new(9.9312, 76.2673));
        assert_eq!(view.zoom, WIDE_ZOOM);
    }

    #[test]
    fn reconcile_with_empty_history_keeps_markers_and_view() {
        let mut set = marker_set();
        set.add(&entry("Pune", "low"));
        let before = set.widget().view();

        set.reconcile::<HistoryEntry>(&[]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.widget().live_count(), 1);
        assert_eq!(set.widget().removed_count(), 0);
        assert_eq!(set.widget().view(), before);
    }

    #[test]
    fn teardown_removes_markers() {
        let mut set = marker_set();
        set.add(&entry("Pune", "low"));
        let widget = set.teardown();
        assert_eq!(widget.live_count(), 0);
    }
}
