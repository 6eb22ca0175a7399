#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Types returned by the remote flood assessment service.
//!
//! Results and history entries are immutable records: the workspace only
//! reads them, projects them onto the map, and hands them to the view.
//! Band labels arrive as free text in any case (`"Severe"`, `"SEVERE"`)
//! and are matched against [`RiskBand`] only when a consumer needs the
//! category.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Categorical flood risk level assigned by the assessment service.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum RiskBand {
    /// Score below 0.25.
    Low,
    /// Score from 0.25 up to 0.50.
    Moderate,
    /// Score from 0.50 up to 0.75.
    High,
    /// Score of 0.75 and above.
    Severe,
}

impl RiskBand {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Moderate, Self::High, Self::Severe]
    }

    /// Matches a band label case-insensitively against the four known bands.
    ///
    /// Surrounding whitespace is not stripped: `" HIGH"` does not match.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }

    /// Resolves an optional band label, falling back to [`Self::Low`] for
    /// absent or unrecognized labels.
    #[must_use]
    pub fn from_label_or_low(label: Option<&str>) -> Self {
        label.and_then(Self::parse_label).unwrap_or(Self::Low)
    }
}

/// One feature that drove an assessment, as explained by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Indicator name.
    pub feature: String,
    /// The indicator's submitted value.
    pub score: f64,
    /// Weighted contribution to the risk score.
    pub impact: f64,
}

/// The service's verdict for one submitted scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// District the scenario described.
    pub district: String,
    /// State the scenario described.
    pub state: String,
    /// Risk score in `0.0..=1.0`.
    pub score: f64,
    /// Model confidence as a percentage.
    pub confidence: f64,
    /// Risk band label, in whatever case the service sent.
    #[serde(default)]
    pub band: Option<String>,
    /// Top drivers, most influential first.
    #[serde(default)]
    pub drivers: Vec<Driver>,
    /// When the scenario was issued (ISO 8601).
    pub timestamp: String,
}

/// Full response to an assessment submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    /// The risk verdict.
    pub risk: AssessmentResult,
    /// Recommended actions keyed by responding agency.
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
}

/// A previously computed assessment as listed by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the scenario was issued (ISO 8601).
    pub timestamp: String,
    /// District the scenario described.
    pub district: String,
    /// State the scenario described.
    pub state: String,
    /// Risk score in `0.0..=1.0`.
    pub score: f64,
    /// Risk band label, in whatever case the service sent.
    #[serde(default)]
    pub band: Option<String>,
    /// Model confidence as a percentage.
    pub confidence: f64,
}

/// Response body of the history endpoint. Items are newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    /// History entries, newest first.
    #[serde(default)]
    pub items: Vec<HistoryEntry>,
}

/// Read access shared by fresh results and history entries, so either can
/// be projected onto the map the same way.
pub trait AssessmentSummary {
    /// District the assessment describes.
    fn district(&self) -> &str;
    /// State the assessment describes.
    fn state(&self) -> &str;
    /// Raw band label, if the service sent one.
    fn band_label(&self) -> Option<&str>;
    /// Risk score in `0.0..=1.0`.
    fn score(&self) -> Option<f64>;
    /// Confidence percentage.
    fn confidence(&self) -> Option<f64>;
    /// Issue timestamp as sent by the service.
    fn timestamp(&self) -> &str;

    /// The band this assessment resolves to, defaulting to low.
    fn band(&self) -> RiskBand {
        RiskBand::from_label_or_low(self.band_label())
    }
}

impl AssessmentSummary for AssessmentResult {
    fn district(&self) -> &str {
        &self.district
    }

    fn state(&self) -> &str {
        &self.state
    }

    fn band_label(&self) -> Option<&str> {
        self.band.as_deref()
    }

    fn score(&self) -> Option<f64> {
        Some(self.score)
    }

    fn confidence(&self) -> Option<f64> {
        Some(self.confidence)
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl AssessmentSummary for HistoryEntry {
    fn district(&self) -> &str {
        &self.district
    }

    fn state(&self) -> &str {
        &self.state
    }

    fn band_label(&self) -> Option<&str> {
        self.band.as_deref()
    }

    fn score(&self) -> Option<f64> {
        Some(self.score)
    }

    fn confidence(&self) -> Option<f64> {
        Some(self.confidence)
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Parses a service timestamp.
///
/// Accepts RFC 3339 with an offset, or a naive ISO 8601 date-time which is
/// taken to be UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_labels_match_case_insensitively() {
        assert_eq!(RiskBand::parse_label("severe"), Some(RiskBand::Severe));
        assert_eq!(RiskBand::parse_label("SEVERE"), Some(RiskBand::Severe));
        assert_eq!(RiskBand::parse_label("Moderate"), Some(RiskBand::Moderate));
        assert_eq!(RiskBand::parse_label("extreme"), None);
        assert_eq!(RiskBand::parse_label(" HIGH"), None);
    }

    #[test]
    fn unknown_or_missing_band_falls_back_to_low() {
        assert_eq!(RiskBand::from_label_or_low(None), RiskBand::Low);
        assert_eq!(RiskBand::from_label_or_low(Some("")), RiskBand::Low);
        assert_eq!(RiskBand::from_label_or_low(Some("catastrophic")), RiskBand::Low);
        assert_eq!(RiskBand::from_label_or_low(Some("high")), RiskBand::High);
    }

    #[test]
    fn band_displays_upper_case() {
        assert_eq!(RiskBand::Severe.to_string(), "SEVERE");
        assert_eq!(RiskBand::Low.as_ref(), "LOW");
    }

    #[test]
    fn decodes_assessment_response() {
        let body = serde_json::json!({
            "risk": {
                "score": 0.82,
                "band": "Severe",
                "confidence": 91.5,
                "district": "Kochi",
                "state": "Kerala",
                "timestamp": "2025-07-01T06:30:00+00:00",
                "drivers": [
                    {"feature": "MonsoonIntensity", "score": 90.0, "impact": 3.4}
                ]
            },
            "actions": {
                "NDMA": "Emergency: Broadcast evacuation orders"
            }
        });
        let response: AssessmentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.risk.district, "Kochi");
        assert_eq!(response.risk.band(), RiskBand::Severe);
        assert_eq!(response.risk.drivers.len(), 1);
        assert_eq!(response.actions.len(), 1);
    }

    #[test]
    fn decodes_result_without_band_or_drivers() {
        let body = serde_json::json!({
            "score": 0.1,
            "confidence": 65.0,
            "district": "Jaipur",
            "state": "Rajasthan",
            "timestamp": "2025-07-01T06:30:00"
        });
        let result: AssessmentResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.band, None);
        assert_eq!(result.band(), RiskBand::Low);
        assert!(result.drivers.is_empty());
    }

    #[test]
    fn missing_history_items_decode_as_empty() {
        let page: HistoryPage = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn parses_offset_and_naive_timestamps() {
        let with_offset = parse_timestamp("2025-07-01T12:00:00+05:30").unwrap();
        assert_eq!(with_offset.to_rfc3339(), "2025-07-01T06:30:00+00:00");

        let naive = parse_timestamp("2025-07-01T06:30:00.250").unwrap();
        assert_eq!(naive.timestamp_millis() % 1000, 250);

        assert!(parse_timestamp("yesterday").is_none());
    }
}
