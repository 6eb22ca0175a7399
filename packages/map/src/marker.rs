//! A single marker and its popup content.

use std::fmt::Write as _;

use flood_workspace_assessment_models::{AssessmentSummary, RiskBand, parse_timestamp};
use flood_workspace_reference::Coordinates;

use crate::MarkerHandle;
use crate::palette::band_color;

/// Popup payload describing the assessment behind a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDetail {
    /// District name.
    pub district: String,
    /// State name.
    pub state: String,
    /// Resolved band.
    pub band: RiskBand,
    /// Risk score, if known.
    pub score: Option<f64>,
    /// Confidence percentage, if known.
    pub confidence: Option<f64>,
    /// Issue timestamp as sent by the service.
    pub timestamp: String,
}

impl MarkerDetail {
    /// Captures the fields a popup needs from any assessment.
    #[must_use]
    pub fn from_summary<S: AssessmentSummary + ?Sized>(summary: &S) -> Self {
        Self {
            district: summary.district().to_string(),
            state: summary.state().to_string(),
            band: summary.band(),
            score: summary.score(),
            confidence: summary.confidence(),
            timestamp: summary.timestamp().to_string(),
        }
    }

    /// Renders the popup as an HTML fragment. All interpolated text is
    /// escaped.
    #[must_use]
    pub fn popup_html(&self) -> String {
        let color = band_color(self.band);
        let mut html = String::from("<div class=\"marker-popup\">");
        let _ = write!(
            html,
            "<h3>{}, {}</h3>",
            escape_html(&self.district),
            escape_html(&self.state)
        );
        let _ = write!(
            html,
            "<span class=\"risk-pill\" style=\"background: {color}\">{} RISK</span>",
            self.band
        );
        let _ = write!(
            html,
            "<p><strong>Score:</strong> {}</p>",
            format_number(self.score, 2, "")
        );
        let _ = write!(
            html,
            "<p><strong>Confidence:</strong> {}</p>",
            format_number(self.confidence, 1, "%")
        );
        let _ = write!(
            html,
            "<p class=\"muted\">{}</p></div>",
            escape_html(&self.display_time())
        );
        html
    }

    /// The timestamp formatted for display, or the raw text if it cannot be
    /// parsed.
    #[must_use]
    pub fn display_time(&self) -> String {
        parse_timestamp(&self.timestamp).map_or_else(
            || self.timestamp.clone(),
            |dt| dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
    }
}

/// A marker currently placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Handle assigned by the widget.
    pub handle: MarkerHandle,
    /// Where the marker sits.
    pub position: Coordinates,
    /// Fill color derived from the band.
    pub color: &'static str,
    /// What the popup shows.
    pub detail: MarkerDetail,
}

fn format_number(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}{suffix}"),
        _ => "N/A".to_string(),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
