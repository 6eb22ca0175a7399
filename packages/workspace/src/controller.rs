//! The workspace controller.
//!
//! [`Workspace`] ties the scenario store, the assessment service, the
//! marker set, and the view together. All methods take `&self`; state lives
//! in cells so a submission can be awaited while the user keeps editing.

// Futures here borrow `RefCell` state and run on a single task.
#![allow(clippy::future_not_send)]

use std::cell::{Cell, RefCell};

use chrono::Utc;
use flood_workspace_assessment_models::AssessmentResponse;
use flood_workspace_client::{AssessmentService, HistoryError};
use flood_workspace_map::{MapWidget, MarkerSet};
use flood_workspace_reference::{
    DEFAULT_SAMPLE_STATE, LocationResolver, SampleLibrary, StateDirectory,
};
use flood_workspace_scenario_models::{
    Indicator, IndicatorVector, Location, UnknownIndicatorError, indicator_label, non_blank,
};

use crate::guard::{RefreshSequencer, SubmitLatch};
use crate::store::IndicatorStore;
use crate::view::WorkspaceView;
use crate::{SampleError, SubmitError, WorkspacePhase};

/// What happened to a history refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The history was shown. Unless it was empty, the markers now show
    /// exactly its `entries` entries.
    Applied {
        /// Number of entries placed.
        entries: usize,
    },
    /// A newer refresh was issued while this one was waiting; its result
    /// was dropped.
    Superseded,
    /// The fetch failed and the markers were left as they were.
    Failed(HistoryError),
}

/// A successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// The service's verdict and recommended actions.
    pub response: AssessmentResponse,
    /// Whether the scenario was edited while the request was in flight.
    /// The result still describes what was submitted.
    pub edited_since_submit: bool,
    /// The history refresh that followed.
    pub history: RefreshOutcome,
}

/// Scenario workspace controller.
///
/// Created once with [`Self::new`], started with [`Self::start`], and
/// released with [`Self::teardown`]. The marker set it owns is the only
/// holder of map markers.
pub struct Workspace<A: AssessmentService, W: MapWidget, V: WorkspaceView> {
    api: A,
    samples: &'static SampleLibrary,
    directory: &'static StateDirectory,
    store: RefCell<IndicatorStore>,
    markers: RefCell<MarkerSet<W>>,
    view: RefCell<V>,
    phase: Cell<WorkspacePhase>,
    latch: SubmitLatch,
    refreshes: RefreshSequencer,
}

impl<A: AssessmentService, W: MapWidget, V: WorkspaceView> Workspace<A, W, V> {
    /// Takes ownership of the map widget, centers it on the country, and
    /// pre-loads the default sample.
    pub fn new(api: A, widget: W, view: V) -> Self {
        let workspace = Self {
            api,
            samples: SampleLibrary::embedded(),
            directory: StateDirectory::embedded(),
            store: RefCell::new(IndicatorStore::new()),
            markers: RefCell::new(MarkerSet::create(widget, LocationResolver::embedded())),
            view: RefCell::new(view),
            phase: Cell::new(WorkspacePhase::Idle),
            latch: SubmitLatch::new(),
            refreshes: RefreshSequencer::new(),
        };
        if workspace.load_default_sample().is_err() {
            log::debug!("Starting with a zeroed scenario");
        }
        workspace
    }

    /// Issues the initial history refresh.
    pub async fn start(&self) -> RefreshOutcome {
        log::info!("Starting scenario workspace");
        self.refresh_history().await
    }

    /// Clears every marker and hands the widget back.
    pub fn teardown(self) -> W {
        log::debug!("Tearing down scenario workspace");
        self.markers.into_inner().teardown()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> WorkspacePhase {
        self.phase.get()
    }

    /// Whether a submission is outstanding.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.latch.is_busy()
    }

    /// Snapshot of the current location.
    #[must_use]
    pub fn location(&self) -> Location {
        self.store.borrow().location().clone()
    }

    /// Snapshot of the current indicator values.
    #[must_use]
    pub fn indicators(&self) -> IndicatorVector {
        *self.store.borrow().vector()
    }

    /// Number of markers on the map.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.borrow().len()
    }

    /// Runs `inspect` against the marker set.
    pub fn with_markers<R>(&self, inspect: impl FnOnce(&MarkerSet<W>) -> R) -> R {
        inspect(&*self.markers.borrow())
    }

    /// Runs `inspect` against the view.
    pub fn with_view<R>(&self, inspect: impl FnOnce(&V) -> R) -> R {
        inspect(&*self.view.borrow())
    }

    /// Selects a state.
    ///
    /// The district is reset and the state's district options are pushed to
    /// the view. If the state has a curated sample, it is loaded, which also
    /// sets the district.
    pub fn select_state(&self, state: &str) {
        let state = non_blank(Some(state));
        log::debug!("Selected state {state:?}");

        let loaded = {
            let mut store = self.store.borrow_mut();
            store.set_state(state.as_deref());
            store.set_district(None);
            state
                .as_deref()
                .is_some_and(|name| store.load_sample(self.samples, name).is_ok())
        };

        if loaded {
            self.publish_indicators();
        }
        self.publish_location();
    }

    /// Sets the district to free text. Blank input clears it.
    pub fn select_district(&self, district: &str) {
        self.store.borrow_mut().set_district(Some(district));
        self.publish_location();
    }

    /// Replaces the scenario with `state`'s curated sample.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::NoSampleForLocation`] if there is none; the
    /// scenario is unchanged and the view is not told.
    pub fn load_sample(&self, state: &str) -> Result<(), SampleError> {
        let loaded = self
            .store
            .borrow_mut()
            .load_sample(self.samples, state)
            .map(|sample| sample.district.clone());

        match loaded {
            Ok(district) => {
                log::debug!("Loaded sample for {district}, {state}");
                self.publish_indicators();
                self.publish_location();
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                Err(e)
            }
        }
    }

    /// Loads the sample for [`DEFAULT_SAMPLE_STATE`].
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::NoSampleForLocation`] if the sample table
    /// lacks it.
    pub fn load_default_sample(&self) -> Result<(), SampleError> {
        self.load_sample(DEFAULT_SAMPLE_STATE)
    }

    /// Writes one indicator, clamped into `0..=100`, and returns the stored
    /// value.
    pub fn set_indicator(&self, indicator: Indicator, value: i64) -> u8 {
        let stored = self.store.borrow_mut().set_indicator(indicator, value);
        self.notify_view(|view| {
            view.indicator_changed(indicator, stored, &indicator_label(stored));
        });
        stored
    }

    /// [`Self::set_indicator`] by indicator name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownIndicatorError`] if `name` is not one of the twenty
    /// indicators.
    pub fn set_indicator_by_name(
        &self,
        name: &str,
        value: i64,
    ) -> Result<u8, UnknownIndicatorError> {
        let indicator = Indicator::from_name(name)?;
        Ok(self.set_indicator(indicator, value))
    }

    /// Submits the current scenario.
    ///
    /// At most one submission is outstanding at a time. On success the
    /// result is shown, a marker is placed for it, submission is re-enabled,
    /// and the history is refreshed. On failure the error is shown and no
    /// marker is placed. Submission is re-enabled on every exit path,
    /// including when the returned future is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] without sending anything if a
    /// submission is already outstanding, or [`SubmitError::Assessment`] if
    /// the service call failed.
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        let Some(guard) = self.latch.try_acquire(|| self.release_submission()) else {
            log::debug!("Ignoring submit while an assessment is in flight");
            return Err(SubmitError::InFlight);
        };
        self.notify_view(|view| view.submission_enabled(false));
        self.transition(WorkspacePhase::Submitting);

        let (payload, revision) = {
            let store = self.store.borrow();
            (store.to_payload(Utc::now()), store.revision())
        };
        let outcome = self.api.submit(&payload).await;

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                log::warn!(
                    "Assessment for {}, {} failed: {e}",
                    payload.district,
                    payload.state
                );
                self.transition(WorkspacePhase::Idle);
                self.notify_view(|view| view.show_assessment_error(&e));
                drop(guard);
                return Err(e.into());
            }
        };

        let edited_since_submit = self.store.borrow().revision() != revision;
        if edited_since_submit {
            log::info!(
                "Scenario was edited while assessing {}, {}; showing the submitted result",
                payload.district,
                payload.state
            );
        }
        log::info!(
            "Assessed {}, {}: {} ({:.2})",
            response.risk.district,
            response.risk.state,
            response.risk.band.as_deref().unwrap_or("no band"),
            response.risk.score
        );

        self.transition(WorkspacePhase::ShowingResult);
        self.notify_view(|view| view.show_result(&response));
        self.markers.borrow_mut().add(&response.risk);
        drop(guard);

        let history = self.refresh_history().await;
        Ok(SubmitOutcome {
            response,
            edited_since_submit,
            history,
        })
    }

    /// Fetches the history and rebuilds the markers from it.
    ///
    /// Only the most recently issued refresh may apply its result. An empty
    /// history is shown but leaves the markers as they are. On failure the
    /// markers are left untouched and the error is shown.
    pub async fn refresh_history(&self) -> RefreshOutcome {
        let token = self.refreshes.issue();
        log::debug!("Issued history refresh {token:?}");

        let result = self.api.history().await;

        if !self.refreshes.is_current(token) {
            log::debug!("Discarding superseded history refresh {token:?}");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(entries) => {
                self.markers.borrow_mut().reconcile(&entries);
                self.notify_view(|view| view.show_history(&entries));
                RefreshOutcome::Applied {
                    entries: entries.len(),
                }
            }
            Err(e) => {
                log::warn!("{e}");
                self.notify_view(|view| view.show_history_error(&e));
                RefreshOutcome::Failed(e)
            }
        }
    }

    fn release_submission(&self) {
        if self.phase.get() == WorkspacePhase::Submitting {
            self.transition(WorkspacePhase::Idle);
        }
        self.notify_view(|view| view.submission_enabled(true));
    }

    fn transition(&self, phase: WorkspacePhase) {
        let previous = self.phase.replace(phase);
        if previous != phase {
            log::info!("Workspace {previous} -> {phase}");
            self.notify_view(|view| view.phase_changed(phase));
        }
    }

    fn publish_indicators(&self) {
        let vector = *self.store.borrow().vector();
        self.notify_view(|view| {
            for (indicator, value) in vector.iter() {
                view.indicator_changed(indicator, value, &indicator_label(value));
            }
        });
    }

    fn publish_location(&self) {
        let location = self.store.borrow().location().clone();
        let districts = location
            .state
            .as_deref()
            .map(|state| self.directory.districts(state))
            .unwrap_or_default();
        self.notify_view(|view| view.location_changed(&location, districts));
    }

    fn notify_view(&self, update: impl FnOnce(&mut V)) {
        match self.view.try_borrow_mut() {
            Ok(mut view) => update(&mut *view),
            Err(_) => log::error!("Skipped view update: view is busy"),
        }
    }
}
