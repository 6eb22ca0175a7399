//! `reqwest`-backed [`AssessmentService`].

use flood_workspace_assessment_models::{AssessmentResponse, HistoryEntry, HistoryPage};
use flood_workspace_scenario_models::ScenarioPayload;

use crate::config::{ClientConfig, ConfigError};
use crate::{AssessmentError, AssessmentService, HistoryError};

/// Maximum length of the response body preview included in error messages.
const BODY_PREVIEW_LEN: usize = 200;

/// Talks to the assessment service over HTTP.
///
/// Each call issues exactly one request. Classification of the outcome
/// lives in [`decode_assessment`] and [`decode_history`].
#[derive(Debug, Clone)]
pub struct HttpAssessmentClient {
    client: reqwest::Client,
    assess_url: String,
    history_url: String,
    history_limit: Option<u32>,
}

impl HttpAssessmentClient {
    /// Creates a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            assess_url: config.assess_url(),
            history_url: config.history_url(),
            history_limit: config.history_limit,
        })
    }
}

#[async_trait::async_trait]
impl AssessmentService for HttpAssessmentClient {
    async fn submit(
        &self,
        payload: &ScenarioPayload,
    ) -> Result<AssessmentResponse, AssessmentError> {
        log::debug!(
            "POST {} for {}, {}",
            self.assess_url,
            payload.district,
            payload.state
        );

        let response = self
            .client
            .post(&self.assess_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AssessmentError::Unreachable {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AssessmentError::MalformedResponse {
                message: format!("failed to read body: {e}"),
            })?;

        decode_assessment(status, &body)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        log::debug!("GET {}", self.history_url);

        let mut request = self.client.get(&self.history_url);
        if let Some(limit) = self.history_limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await.map_err(|e| HistoryError::Unavailable {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HistoryError::Unavailable {
                message: format!("failed to read body: {e}"),
            })?;

        decode_history(status, &body)
    }
}

/// Classifies an assessment response by status and body.
///
/// # Errors
///
/// Returns [`AssessmentError::ServiceRejected`] for a non-2xx status and
/// [`AssessmentError::MalformedResponse`] if a 2xx body does not decode.
pub fn decode_assessment(status: u16, body: &str) -> Result<AssessmentResponse, AssessmentError> {
    if !is_success(status) {
        log::warn!("Assessment rejected with status {status}: {}", preview(body));
        return Err(AssessmentError::ServiceRejected { status });
    }
    serde_json::from_str(body).map_err(|e| AssessmentError::MalformedResponse {
        message: format!("{e} (body: {})", preview(body)),
    })
}

/// Classifies a history response by status and body.
///
/// # Errors
///
/// Returns [`HistoryError::Unavailable`] for a non-2xx status or an
/// undecodable body.
pub fn decode_history(status: u16, body: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
    if !is_success(status) {
        return Err(HistoryError::Unavailable {
            message: format!("service returned status {status}"),
        });
    }
    let page: HistoryPage = serde_json::from_str(body).map_err(|e| HistoryError::Unavailable {
        message: format!("malformed response: {e}"),
    })?;
    Ok(page.items)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW_LEN {
        return body;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
