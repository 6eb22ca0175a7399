#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Flood scenario types: the twenty risk indicators, the location being
//! assessed, curated samples, and the submission payload.
//!
//! Indicator values are always integers in `0..=100`. The only way to write
//! one is through [`clamp_indicator`], so out-of-range input is pulled back
//! into range rather than rejected.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of indicators in a scenario.
pub const INDICATOR_COUNT: usize = 20;

/// Largest value an indicator can hold.
pub const INDICATOR_MAX: u8 = 100;

/// Placeholder used for an unset state or district at submission time.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// One of the twenty normalized flood risk indicators.
///
/// Serialized names match the variant names exactly (e.g.
/// `"MonsoonIntensity"`), which is also the key used on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Indicator {
    /// Strength of the monsoon season.
    MonsoonIntensity,
    /// How well terrain drains surface water.
    TopographyDrainage,
    /// Quality of river management.
    RiverManagement,
    /// Extent of forest loss.
    Deforestation,
    /// Degree of urban land cover.
    Urbanization,
    /// Local climate change pressure.
    ClimateChange,
    /// Condition of dams.
    DamsQuality,
    /// Sediment buildup in waterways.
    Siltation,
    /// Impact of farming practices.
    AgriculturalPractices,
    /// Building on floodplains and channels.
    Encroachments,
    /// Lack of disaster preparedness.
    IneffectiveDisasterPreparedness,
    /// Capacity of drainage systems.
    DrainageSystems,
    /// Exposure to coastal flooding.
    CoastalVulnerability,
    /// Landslide susceptibility.
    Landslides,
    /// Health of watersheds.
    Watersheds,
    /// Decay of flood-relevant infrastructure.
    DeterioratingInfrastructure,
    /// Population density pressure.
    PopulationScore,
    /// Loss of natural wetlands.
    WetlandLoss,
    /// Shortfalls in land-use planning.
    InadequatePlanning,
    /// Governance and political factors.
    PoliticalFactors,
}

impl Indicator {
    /// Returns all indicators in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self; INDICATOR_COUNT] {
        &[
            Self::MonsoonIntensity,
            Self::TopographyDrainage,
            Self::RiverManagement,
            Self::Deforestation,
            Self::Urbanization,
            Self::ClimateChange,
            Self::DamsQuality,
            Self::Siltation,
            Self::AgriculturalPractices,
            Self::Encroachments,
            Self::IneffectiveDisasterPreparedness,
            Self::DrainageSystems,
            Self::CoastalVulnerability,
            Self::Landslides,
            Self::Watersheds,
            Self::DeterioratingInfrastructure,
            Self::PopulationScore,
            Self::WetlandLoss,
            Self::InadequatePlanning,
            Self::PoliticalFactors,
        ]
    }

    /// Parses an indicator from its canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownIndicatorError`] if `name` is not one of the twenty
    /// indicator names.
    pub fn from_name(name: &str) -> Result<Self, UnknownIndicatorError> {
        name.parse().map_err(|_| UnknownIndicatorError {
            name: name.to_string(),
        })
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Error returned when a string does not name one of the twenty indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIndicatorError {
    /// The name that failed to parse.
    pub name: String,
}

impl std::fmt::Display for UnknownIndicatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown indicator '{}'", self.name)
    }
}

impl std::error::Error for UnknownIndicatorError {}

/// Pulls an arbitrary integer into the indicator range `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp_indicator(value: i64) -> u8 {
    if value < 0 {
        0
    } else if value > INDICATOR_MAX as i64 {
        INDICATOR_MAX
    } else {
        value as u8
    }
}

/// Formats the display label shown next to an indicator control.
#[must_use]
pub fn indicator_label(value: u8) -> String {
    format!("{value} / {INDICATOR_MAX}")
}

/// The full set of twenty indicator values for a scenario.
///
/// Every indicator always has a value; a fresh vector starts at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorVector {
    values: [u8; INDICATOR_COUNT],
}

impl IndicatorVector {
    /// Creates a vector with every indicator at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [0; INDICATOR_COUNT],
        }
    }

    /// Returns the stored value for `indicator`.
    #[must_use]
    pub const fn get(&self, indicator: Indicator) -> u8 {
        self.values[indicator.index()]
    }

    /// Clamps `value` into range, stores it, and returns what was stored.
    pub const fn set(&mut self, indicator: Indicator, value: i64) -> u8 {
        let clamped = clamp_indicator(value);
        self.values[indicator.index()] = clamped;
        clamped
    }

    /// Iterates over all indicators in canonical order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, u8)> + '_ {
        Indicator::all()
            .iter()
            .map(|&indicator| (indicator, self.get(indicator)))
    }
}

impl Serialize for IndicatorVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(INDICATOR_COUNT))?;
        for (indicator, value) in self.iter() {
            map.serialize_entry(indicator.as_ref(), &value)?;
        }
        map.end()
    }
}

/// The state and district a scenario describes.
///
/// Both parts are optional while editing; [`Self::state_or_unknown`] and
/// [`Self::district_or_unknown`] supply the submission-time placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Selected state or union territory.
    pub state: Option<String>,
    /// Selected district. Free text until submission.
    pub district: Option<String>,
}

impl Location {
    /// Creates a location from raw form input, treating blank text as unset.
    #[must_use]
    pub fn new(state: Option<&str>, district: Option<&str>) -> Self {
        Self {
            state: non_blank(state),
            district: non_blank(district),
        }
    }

    /// Returns the state, or [`UNKNOWN_LOCATION`] when unset.
    #[must_use]
    pub fn state_or_unknown(&self) -> &str {
        self.state.as_deref().unwrap_or(UNKNOWN_LOCATION)
    }

    /// Returns the district, or [`UNKNOWN_LOCATION`] when unset.
    #[must_use]
    pub fn district_or_unknown(&self) -> &str {
        self.district.as_deref().unwrap_or(UNKNOWN_LOCATION)
    }
}

/// Trims form input and maps blank text to `None`.
#[must_use]
pub fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// A curated scenario for one state, used for demonstrations.
///
/// Samples may omit indicators; omitted ones read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sample {
    /// District the sample describes.
    pub district: String,
    /// Indicator values listed by the sample.
    #[serde(flatten)]
    pub indicators: BTreeMap<Indicator, u8>,
}

impl Sample {
    /// Returns the sample's value for `indicator`, or zero if it has none.
    #[must_use]
    pub fn value(&self, indicator: Indicator) -> u8 {
        self.indicators
            .get(&indicator)
            .map_or(0, |&v| clamp_indicator(i64::from(v)))
    }

    /// Expands the sample into a complete indicator vector.
    #[must_use]
    pub fn to_vector(&self) -> IndicatorVector {
        let mut vector = IndicatorVector::new();
        for &indicator in Indicator::all() {
            vector.set(indicator, i64::from(self.value(indicator)));
        }
        vector
    }
}

/// Request body for an assessment submission.
///
/// Serializes as a single flat JSON object: location, timestamp, and one
/// key per indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioPayload {
    /// District name, or `"Unknown"`.
    pub district: String,
    /// State name, or `"Unknown"`.
    pub state: String,
    /// When the scenario was submitted.
    pub timestamp: DateTime<Utc>,
    /// All twenty indicator values.
    #[serde(flatten)]
    pub indicators: IndicatorVector,
}

impl ScenarioPayload {
    /// Builds a payload, substituting `"Unknown"` for unset location parts.
    #[must_use]
    pub fn new(location: &Location, indicators: IndicatorVector, timestamp: DateTime<Utc>) -> Self {
        Self {
            district: location.district_or_unknown().to_string(),
            state: location.state_or_unknown().to_string(),
            timestamp,
            indicators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(clamp_indicator(-5), 0);
        assert_eq!(clamp_indicator(0), 0);
        assert_eq!(clamp_indicator(55), 55);
        assert_eq!(clamp_indicator(100), 100);
        assert_eq!(clamp_indicator(250), 100);
        assert_eq!(clamp_indicator(i64::MIN), 0);
        assert_eq!(clamp_indicator(i64::MAX), 100);
    }

    #[test]
    fn vector_set_stores_clamped_value() {
        let mut vector = IndicatorVector::new();
        assert_eq!(vector.set(Indicator::Urbanization, 140), 100);
        assert_eq!(vector.get(Indicator::Urbanization), 100);
        assert_eq!(vector.set(Indicator::Siltation, -1), 0);
        assert_eq!(vector.get(Indicator::Siltation), 0);
    }

    #[test]
    fn all_lists_twenty_distinct_indicators() {
        let all = Indicator::all();
        let unique: std::collections::BTreeSet<_> = all.iter().collect();
        assert_eq!(unique.len(), INDICATOR_COUNT);
        assert_eq!(all[0], Indicator::MonsoonIntensity);
        assert_eq!(all[INDICATOR_COUNT - 1], Indicator::PoliticalFactors);
    }

    #[test]
    fn parses_indicator_names() {
        assert_eq!(
            Indicator::from_name("WetlandLoss"),
            Ok(Indicator::WetlandLoss)
        );
        let err = Indicator::from_name("wetlandloss").unwrap_err();
        assert_eq!(err.name, "wetlandloss");
    }

    #[test]
    fn blank_location_parts_become_unknown() {
        let location = Location::new(Some("  "), None);
        assert_eq!(location.state_or_unknown(), UNKNOWN_LOCATION);
        assert_eq!(location.district_or_unknown(), UNKNOWN_LOCATION);

        let location = Location::new(Some(" Kerala "), Some("Kochi"));
        assert_eq!(location.state.as_deref(), Some("Kerala"));
        assert_eq!(location.district_or_unknown(), "Kochi");
    }

    #[test]
    fn sample_fills_missing_indicators_with_zero() {
        let sample = Sample {
            district: "Pune".to_string(),
            indicators: BTreeMap::from([(Indicator::MonsoonIntensity, 72)]),
        };
        let vector = sample.to_vector();
        assert_eq!(vector.get(Indicator::MonsoonIntensity), 72);
        assert_eq!(vector.get(Indicator::Urbanization), 0);
    }

    #[test]
    fn payload_serializes_flat_with_every_indicator() {
        let mut vector = IndicatorVector::new();
        vector.set(Indicator::MonsoonIntensity, 72);
        let timestamp = DateTime::parse_from_rfc3339("2025-07-01T06:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let payload = ScenarioPayload::new(&Location::default(), vector, timestamp);

        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), INDICATOR_COUNT + 3);
        assert_eq!(object["state"], "Unknown");
        assert_eq!(object["district"], "Unknown");
        assert_eq!(object["MonsoonIntensity"], 72);
        assert_eq!(object["PoliticalFactors"], 0);
        assert_eq!(object["timestamp"], "2025-07-01T06:30:00Z");
    }

    #[test]
    fn label_shows_value_out_of_hundred() {
        assert_eq!(indicator_label(72), "72 / 100");
    }
}
