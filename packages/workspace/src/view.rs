//! Presentation trait for the scenario workspace.
//!
//! Defines a [`WorkspaceView`] trait that decouples the controller from any
//! specific rendering surface (a browser page, a terminal, or nothing at
//! all). The controller calls into the view after every state change; the
//! view never calls back.

use flood_workspace_assessment_models::{AssessmentResponse, HistoryEntry};
use flood_workspace_client::{AssessmentError, HistoryError};
use flood_workspace_scenario_models::{Indicator, Location};

use crate::WorkspacePhase;

/// Receives every user-visible change the workspace makes.
pub trait WorkspaceView {
    /// The workspace moved to a new phase.
    fn phase_changed(&mut self, phase: WorkspacePhase);

    /// The submit control should be enabled or disabled.
    fn submission_enabled(&mut self, enabled: bool);

    /// An indicator's stored value changed. `label` is its display text.
    fn indicator_changed(&mut self, indicator: Indicator, value: u8, label: &str);

    /// The location changed. `districts` are the options for its state,
    /// empty when the state is unknown or unset.
    fn location_changed(&mut self, location: &Location, districts: &[String]);

    /// An assessment succeeded.
    fn show_result(&mut self, response: &AssessmentResponse);

    /// An assessment failed.
    fn show_assessment_error(&mut self, error: &AssessmentError);

    /// A history refresh succeeded. Entries are newest first.
    fn show_history(&mut self, entries: &[HistoryEntry]);

    /// A history refresh failed.
    fn show_history_error(&mut self, error: &HistoryError);
}

/// A no-op implementation of [`WorkspaceView`] that silently ignores all
/// updates.
///
/// Useful for headless runs and tests that only inspect controller state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl WorkspaceView for NullView {
    fn phase_changed(&mut self, _phase: WorkspacePhase) {}
    fn submission_enabled(&mut self, _enabled: bool) {}
    fn indicator_changed(&mut self, _indicator: Indicator, _value: u8, _label: &str) {}
    fn location_changed(&mut self, _location: &Location, _districts: &[String]) {}
    fn show_result(&mut self, _response: &AssessmentResponse) {}
    fn show_assessment_error(&mut self, _error: &AssessmentError) {}
    fn show_history(&mut self, _entries: &[HistoryEntry]) {}
    fn show_history_error(&mut self, _error: &HistoryError) {}
}
