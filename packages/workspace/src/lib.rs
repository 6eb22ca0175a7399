#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scenario workspace controller.
//!
//! Owns the scenario being edited, admits one assessment at a time, and
//! keeps the map's markers consistent with the assessment history. The
//! [`Workspace`] reacts to four triggers (location selection, sample
//! loading, indicator edits, and submission) and reports every visible
//! change through a [`WorkspaceView`].
//!
//! The controller is single-threaded and cooperative: its futures borrow
//! the workspace, are not `Send`, and never hold internal state borrowed
//! across an `.await`.

pub mod controller;
pub mod guard;
pub mod store;
pub mod view;

pub use controller::{RefreshOutcome, SubmitOutcome, Workspace};
pub use guard::{RefreshSequencer, RefreshToken, SubmitGuard, SubmitLatch};
pub use store::IndicatorStore;
pub use view::{NullView, WorkspaceView};

use flood_workspace_client::AssessmentError;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Where the workspace is in the submission cycle.
///
/// `ShowingResult` accepts the same triggers as `Idle`; it only records
/// that the last submission succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, AsRefStr)]
pub enum WorkspacePhase {
    /// Ready for input.
    #[default]
    Idle,
    /// An assessment is in flight.
    Submitting,
    /// The last assessment succeeded and is on display.
    ShowingResult,
}

/// Errors from loading a curated sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    /// No sample is curated for the requested state.
    #[error("No sample for location '{state}'")]
    NoSampleForLocation {
        /// The state that was requested.
        state: String,
    },
}

/// Errors from a submit request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Another submission is still outstanding; nothing was sent.
    #[error("An assessment is already in flight")]
    InFlight,

    /// The assessment was sent and failed.
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}
