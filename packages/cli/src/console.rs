//! Terminal rendering of workspace updates.

use std::fmt::Write as _;

use flood_workspace::{WorkspacePhase, WorkspaceView};
use flood_workspace_assessment_models::{AssessmentResponse, AssessmentSummary, HistoryEntry};
use flood_workspace_client::{AssessmentError, HistoryError};
use flood_workspace_map::MarkerDetail;
use flood_workspace_scenario_models::{Indicator, Location};

/// Prints results and history to stdout and errors to stderr. Everything
/// else goes to the log.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl WorkspaceView for ConsoleView {
    fn phase_changed(&mut self, phase: WorkspacePhase) {
        log::debug!("Phase: {phase}");
    }

    fn submission_enabled(&mut self, enabled: bool) {
        log::trace!("Submission enabled: {enabled}");
    }

    fn indicator_changed(&mut self, indicator: Indicator, _value: u8, label: &str) {
        log::trace!("{indicator} = {label}");
    }

    fn location_changed(&mut self, location: &Location, districts: &[String]) {
        log::debug!(
            "Location: {}, {} ({} district options)",
            location.district_or_unknown(),
            location.state_or_unknown(),
            districts.len()
        );
    }

    fn show_result(&mut self, response: &AssessmentResponse) {
        print!("{}", format_result(response));
    }

    fn show_assessment_error(&mut self, error: &AssessmentError) {
        eprintln!("{error}");
    }

    fn show_history(&mut self, entries: &[HistoryEntry]) {
        print!("{}", format_history(entries));
    }

    fn show_history_error(&mut self, error: &HistoryError) {
        eprintln!("{error}");
    }
}

/// Renders an assessment verdict, its drivers, and recommended actions.
#[must_use]
pub fn format_result(response: &AssessmentResponse) -> String {
    let risk = &response.risk;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}, {}: {} RISK (score {:.2}, confidence {:.1}%)",
        risk.district,
        risk.state,
        risk.band(),
        risk.score,
        risk.confidence
    );
    if !risk.drivers.is_empty() {
        let _ = writeln!(out, "Drivers:");
        for driver in &risk.drivers {
            let _ = writeln!(
                out,
                "  {:<32} {:>5.1}  impact {:+.3}",
                driver.feature, driver.score, driver.impact
            );
        }
    }
    if !response.actions.is_empty() {
        let _ = writeln!(out, "Actions:");
        for (agency, action) in &response.actions {
            let _ = writeln!(out, "  {agency}: {action}");
        }
    }
    out
}

/// Renders history entries as a table, newest first.
#[must_use]
pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No assessments yet.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<24} {:<10} {:>6} {:>7}",
        "TIME", "LOCATION", "BAND", "SCORE", "CONF"
    );
    let _ = writeln!(out, "{}", "-".repeat(71));
    for entry in entries {
        let detail = MarkerDetail::from_summary(entry);
        let _ = writeln!(
            out,
            "{:<20} {:<24} {:<10} {:>6.2} {:>6.1}%",
            detail.display_time(),
            format!("{}, {}", entry.district, entry.state),
            detail.band,
            entry.score,
            entry.confidence
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use flood_workspace_assessment_models::{AssessmentResult, Driver};

    use super::*;

    #[test]
    fn result_lists_drivers_and_actions() {
        let response = AssessmentResponse {
            risk: AssessmentResult {
                district: "Kochi".to_string(),
                state: "Kerala".to_string(),
                score: 0.8234,
                confidence: 91.27,
                band: Some("severe".to_string()),
                drivers: vec![Driver {
                    feature: "MonsoonIntensity".to_string(),
                    score: 90.0,
                    impact: 0.125,
                }],
                timestamp: "2025-07-01T06:30:00".to_string(),
            },
            actions: [("NDMA".to_string(), "Broadcast evacuation orders".to_string())]
                .into_iter()
                .collect(),
        };

        let text = format_result(&response);

        assert!(text.starts_with("Kochi, Kerala: SEVERE RISK (score 0.82, confidence 91.3%)"));
        assert!(text.contains("MonsoonIntensity"));
        assert!(text.contains("impact +0.125"));
        assert!(text.contains("  NDMA: Broadcast evacuation orders"));
    }

    #[test]
    fn history_table_keeps_service_order() {
        let entries = vec![
            HistoryEntry {
                timestamp: "2025-07-02T08:00:00".to_string(),
                district: "Patna".to_string(),
                state: "Bihar".to_string(),
                score: 0.61,
                band: Some("High".to_string()),
                confidence: 84.0,
            },
            HistoryEntry {
                timestamp: "2025-07-01T08:00:00".to_string(),
                district: "Pune".to_string(),
                state: "Maharashtra".to_string(),
                score: 0.2,
                band: None,
                confidence: 70.0,
            },
        ];

        let text = format_history(&entries);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("Patna, Bihar"));
        assert!(lines[2].contains("HIGH"));
        assert!(lines[3].contains("Pune, Maharashtra"));
        assert!(lines[3].contains("LOW"));
    }

    #[test]
    fn empty_history_says_so() {
        assert_eq!(format_history(&[]), "No assessments yet.\n");
    }
}
