//! Scenario input state: the indicator vector and the selected location.

use chrono::{DateTime, Utc};
use flood_workspace_reference::SampleLibrary;
use flood_workspace_scenario_models::{
    Indicator, IndicatorVector, Location, Sample, ScenarioPayload, non_blank,
};

use crate::SampleError;

/// Holds the scenario being edited.
///
/// Every mutation bumps [`Self::revision`], which lets the controller tell
/// whether the scenario changed while a submission was in flight.
#[derive(Debug, Clone, Default)]
pub struct IndicatorStore {
    vector: IndicatorVector,
    location: Location,
    revision: u64,
}

impl IndicatorStore {
    /// Creates a store with every indicator at zero and no location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current indicator values.
    #[must_use]
    pub const fn vector(&self) -> &IndicatorVector {
        &self.vector
    }

    /// The current location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Counter incremented on every mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Clamps `value` into `0..=100`, stores it, and returns what was stored.
    pub fn set_indicator(&mut self, indicator: Indicator, value: i64) -> u8 {
        self.revision += 1;
        self.vector.set(indicator, value)
    }

    /// Replaces the state. Blank input clears it.
    pub fn set_state(&mut self, state: Option<&str>) {
        self.revision += 1;
        self.location.state = non_blank(state);
    }

    /// Replaces the district. Blank input clears it.
    pub fn set_district(&mut self, district: Option<&str>) {
        self.revision += 1;
        self.location.district = non_blank(district);
    }

    /// Overwrites the vector and location with `state`'s curated sample.
    ///
    /// Indicators the sample omits become zero.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::NoSampleForLocation`] and leaves the store
    /// untouched if `library` has no sample for `state`.
    pub fn load_sample<'a>(
        &mut self,
        library: &'a SampleLibrary,
        state: &str,
    ) -> Result<&'a Sample, SampleError> {
        let sample = library
            .get(state)
            .ok_or_else(|| SampleError::NoSampleForLocation {
                state: state.to_string(),
            })?;

        self.revision += 1;
        self.vector = sample.to_vector();
        self.location = Location::new(Some(state), Some(&sample.district));
        Ok(sample)
    }

    /// Builds the submission body from the current state.
    #[must_use]
    pub fn to_payload(&self, timestamp: DateTime<Utc>) -> ScenarioPayload {
        ScenarioPayload::new(&self.location, self.vector, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use flood_workspace_scenario_models::INDICATOR_COUNT;

    use super::*;

    #[test]
    fn starts_zeroed_and_unlocated() {
        let store = IndicatorStore::new();
        assert!(store.vector().iter().all(|(_, v)| v == 0));
        assert_eq!(store.location(), &Location::default());
    }

    #[test]
    fn writes_are_clamped() {
        let mut store = IndicatorStore::new();
        for (input, stored) in [(-20, 0), (0, 0), (42, 42), (100, 100), (101, 100)] {
            assert_eq!(store.set_indicator(Indicator::DamsQuality, input), stored);
            assert_eq!(store.vector().get(Indicator::DamsQuality), stored);
        }
    }

    #[test]
    fn loading_maharashtra_sets_pune_and_all_values() {
        let library = SampleLibrary::embedded();
        let mut store = IndicatorStore::new();
        store.load_sample(library, "Maharashtra").unwrap();

        assert_eq!(store.location().state.as_deref(), Some("Maharashtra"));
        assert_eq!(store.location().district.as_deref(), Some("Pune"));
        assert_eq!(store.vector().get(Indicator::MonsoonIntensity), 72);
        assert_eq!(store.vector().get(Indicator::Urbanization), 75);

        let sample = library.get("Maharashtra").unwrap();
        for &indicator in Indicator::all() {
            assert_eq!(store.vector().get(indicator), sample.value(indicator));
        }
    }

    #[test]
    fn missing_sample_leaves_store_unchanged() {
        let mut store = IndicatorStore::new();
        store.set_indicator(Indicator::Siltation, 33);
        let before = store.clone();

        let err = store
            .load_sample(SampleLibrary::embedded(), "Atlantis")
            .unwrap_err();

        assert_eq!(
            err,
            SampleError::NoSampleForLocation {
                state: "Atlantis".to_string()
            }
        );
        assert_eq!(store.vector(), before.vector());
        assert_eq!(store.location(), before.location());
        assert_eq!(store.revision(), before.revision());
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut store = IndicatorStore::new();
        store.set_indicator(Indicator::Landslides, 5);
        store.set_state(Some("Goa"));
        store.set_district(Some("Panaji"));
        store
            .load_sample(SampleLibrary::embedded(), "Goa")
            .unwrap();
        assert_eq!(store.revision(), 4);
    }

    #[test]
    fn payload_carries_every_indicator_and_defaults_location() {
        let mut store = IndicatorStore::new();
        store.set_indicator(Indicator::Watersheds, 64);
        let timestamp = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();

        let payload = store.to_payload(timestamp);

        assert_eq!(payload.state, "Unknown");
        assert_eq!(payload.district, "Unknown");
        assert_eq!(payload.timestamp, timestamp);
        assert_eq!(payload.indicators.iter().count(), INDICATOR_COUNT);
        assert_eq!(payload.indicators.get(Indicator::Watersheds), 64);
    }
}
