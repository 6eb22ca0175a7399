#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client for the remote flood assessment service.
//!
//! The service exposes two endpoints:
//!
//! - `POST {base}/assess` takes a flat scenario payload and returns an
//!   assessment result plus recommended actions.
//! - `GET {base}/history` returns previously computed assessments, newest
//!   first.
//!
//! [`AssessmentService`] abstracts both so the workspace can run against
//! [`http::HttpAssessmentClient`] in production and in-memory fakes in
//! tests. No call is ever retried; every failure is reported once and the
//! caller decides what to do.

pub mod config;
pub mod http;

pub use config::{ClientConfig, ConfigError, DEFAULT_API_BASE};
pub use http::HttpAssessmentClient;

use flood_workspace_assessment_models::{AssessmentResponse, HistoryEntry};
use flood_workspace_scenario_models::ScenarioPayload;
use thiserror::Error;

/// Why an assessment submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// No response was received.
    #[error("Assessment service unreachable: {message}")]
    Unreachable {
        /// Transport error description.
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("API error: {status}")]
    ServiceRejected {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Malformed assessment response: {message}")]
    MalformedResponse {
        /// Decoding error description.
        message: String,
    },
}

/// Why the assessment history could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The history endpoint failed or returned something undecodable.
    #[error("Unable to load history: {message}")]
    Unavailable {
        /// What went wrong.
        message: String,
    },
}

/// The remote assessment service.
#[async_trait::async_trait]
pub trait AssessmentService: Send + Sync {
    /// Submits one scenario for assessment.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError`] if the service is unreachable, rejects
    /// the request, or returns an undecodable body.
    async fn submit(
        &self,
        payload: &ScenarioPayload,
    ) -> Result<AssessmentResponse, AssessmentError>;

    /// Fetches the session's assessment history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Unavailable`] on any failure.
    async fn history(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
}
