//! Analysis Client — one outbound call per capture.
//!
//! Local validation failures (`InvalidImageEncoding`, `MissingCredential`)
//! are returned before the request is built, so bad input never generates
//! network traffic.

use super::encoding::{normalize_base64, EncodingError};
use super::types::{Analysis, AnalyzeRequest, ErrorBody};

/// Default endpoint of the companion Analysis Service.
const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:3000/api/analyze-image";

pub struct AnalysisClient {
    http: reqwest::Client,
    service_url: String,
}

impl AnalysisClient {
    /// Endpoint from `SNAP_SOLVE_SERVICE_URL`, or the local default.
    pub fn from_env() -> Self {
        let url = std::env::var("SNAP_SOLVE_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());
        Self::new(url)
    }

    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            service_url: service_url.into(),
        }
    }

    /// Validate the payload and credential, then submit exactly once.
    ///
    /// The response is strict-parsed into [`Analysis`]; a non-2xx status
    /// surfaces the service's own error text verbatim.
    pub async fn analyze(
        &self,
        base64_input: &str,
        api_key: &str,
    ) -> Result<Analysis, AnalysisError> {
        let payload = normalize_base64(base64_input)?;

        if api_key.trim().is_empty() {
            return Err(AnalysisError::MissingCredential);
        }

        let start = std::time::Instant::now();
        log::info!(
            "[ANALYZE] Submitting {} chars to {}",
            payload.len(),
            self.service_url
        );

        let response = self
            .http
            .post(&self.service_url)
            .json(&AnalyzeRequest {
                base64_input: Some(payload),
                api_key: Some(api_key.to_string()),
            })
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.details.unwrap_or(body.error),
                Err(_) => format!("analysis service returned {}", status),
            };
            log::error!("[ANALYZE] Service error {}: {}", status, message);
            return Err(AnalysisError::Service(message));
        }

        let analysis = response
            .json::<Analysis>()
            .await
            .map_err(|e| AnalysisError::Service(format!("malformed service reply: {}", e)))?;

        log::info!(
            "[ANALYZE] Got {} thoughts, {} lang, in {}ms",
            analysis.thoughts.len(),
            analysis.language,
            start.elapsed().as_millis()
        );

        Ok(analysis)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid screenshot data: {0}")]
    InvalidImageEncoding(#[from] EncodingError),

    #[error("No API key configured — add one in Settings")]
    MissingCredential,

    #[error("{0}")]
    Service(String),

    #[error("Could not reach the analysis service: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) on localhost — any attempt to connect would fail
    // with a transport error, which the assertions below rule out.
    fn unreachable_client() -> AnalysisClient {
        AnalysisClient::new("http://127.0.0.1:9/api/analyze-image")
    }

    #[tokio::test]
    async fn malformed_base64_rejected_without_network() {
        let client = unreachable_client();
        let err = client.analyze("not base64!!!", "sk-test").await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidImageEncoding(_)));
    }

    #[tokio::test]
    async fn bad_padding_rejected_without_network() {
        let client = unreachable_client();
        let err = client.analyze("QUJDR", "sk-test").await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidImageEncoding(EncodingError::BadPadding(5))
        ));
    }

    #[tokio::test]
    async fn missing_credential_rejected_without_network() {
        let client = unreachable_client();
        let err = client.analyze("QUJDRA==", "").await.unwrap_err();
        assert!(matches!(err, AnalysisError::MissingCredential));

        let err = client.analyze("QUJDRA==", "   ").await.unwrap_err();
        assert!(matches!(err, AnalysisError::MissingCredential));
    }
}
