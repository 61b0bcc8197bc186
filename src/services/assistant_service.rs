use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::error::ServiceError;

const DEFAULT_ASSISTANT_URL: &str = "http://localhost:8090/generate";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One question/answer pair as returned by the collaborator. Fields default
/// to empty so a partially-formed pair is dropped by the caller instead of
/// failing the whole batch.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneratedFaq {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    questions: &'a [String],
}

/// Client for the external text-generation collaborator: opaque, potentially
/// slow, potentially empty-returning. No retries; a failure is terminal for
/// the triggering operation.
#[derive(Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    url: String,
}

impl AssistantClient {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            url: url.to_string(),
        }
    }

    pub fn from_env() -> Self {
        let url =
            std::env::var("ASSISTANT_URL").unwrap_or_else(|_| DEFAULT_ASSISTANT_URL.to_string());
        let timeout = std::env::var("ASSISTANT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        log::info!("🤖 Assistant endpoint: {}", url);

        Self::new(&url, Duration::from_secs(timeout))
    }

    /// Sends the question list and returns whatever pairs come back. The
    /// caller validates and dedups.
    pub async fn generate(&self, questions: &[String]) -> Result<Vec<GeneratedFaq>, ServiceError> {
        let response = self
            .http
            .post(&self.url)
            .json(&GenerateRequest { questions })
            .send()
            .await
            .map_err(|e| ServiceError::ExternalService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::ExternalService(format!(
                "Assistant returned HTTP {}",
                response.status()
            )));
        }

        response
            .json::<Vec<GeneratedFaq>>()
            .await
            .map_err(|e| ServiceError::ExternalService(format!("Invalid response: {}", e)))
    }
}
