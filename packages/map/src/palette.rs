//! Marker colors per risk band.

use flood_workspace_assessment_models::RiskBand;

/// Returns the marker color for a band.
#[must_use]
pub const fn band_color(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Low => "#3fc1c9",
        RiskBand::Moderate => "#ffc107",
        RiskBand::High => "#f45b69",
        RiskBand::Severe => "#ff5722",
    }
}

/// Returns the marker color for a raw band label.
///
/// Labels match case-insensitively; absent or unrecognized labels get the
/// low-band color.
#[must_use]
pub fn marker_color(label: Option<&str>) -> &'static str {
    band_color(RiskBand::from_label_or_low(label))
}
