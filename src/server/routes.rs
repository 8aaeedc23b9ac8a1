//! Route composition for the Analysis Service.
//!
//! One endpoint: `POST /api/analyze-image`. Missing input is the
//! caller's fault (400); anything that goes wrong past that point —
//! provider transport, provider status, schema validation — is a 500
//! with the concrete failure reason in `details`.

use super::provider::{ModelProvider, ProviderError};
use crate::analysis::{strip_data_url_prefix, AnalyzeRequest, ErrorBody};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Screenshots of large displays run to tens of megabytes of base64.
const BODY_LIMIT: u64 = 50 * 1024 * 1024;

/// The full service: the analyze route plus CORS and request logging.
pub fn routes(
    provider: Arc<ModelProvider>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["POST", "OPTIONS"]);

    analyze_route(provider)
        .with(cors)
        .with(warp::log("snap_solve::server"))
}

/// `POST /api/analyze-image`
pub fn analyze_route(
    provider: Arc<ModelProvider>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "analyze-image")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and(with_provider(provider))
        .and_then(handle_analyze)
}

/// Injection filter: hand the shared provider to every request.
fn with_provider(
    provider: Arc<ModelProvider>,
) -> impl Filter<Extract = (Arc<ModelProvider>,), Error = Infallible> + Clone {
    warp::any().map(move || provider.clone())
}

async fn handle_analyze(
    body: AnalyzeRequest,
    provider: Arc<ModelProvider>,
) -> Result<impl Reply, Infallible> {
    let input = match body.base64_input.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Ok(error_reply(
                StatusCode::BAD_REQUEST,
                "No base64 data provided",
                None,
            ))
        }
    };

    let payload = strip_data_url_prefix(input);
    log::info!("[SERVER] Analyze request: {} base64 chars", payload.len());

    match provider
        .analyze_image(payload, body.api_key.as_deref())
        .await
    {
        Ok(analysis) => Ok(warp::reply::with_status(
            warp::reply::json(&analysis),
            StatusCode::OK,
        )),
        Err(e) => {
            log::error!("[SERVER] Analysis failed: {}", e);
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error analyzing image",
                Some(provider_detail(e)),
            ))
        }
    }
}

/// The validation failure reason is propagated, not a generic message.
fn provider_detail(e: ProviderError) -> String {
    match e {
        ProviderError::Api { status, body } => format!("model API returned {}: {}", status, body),
        other => other.to_string(),
    }
}

fn error_reply(
    status: StatusCode,
    error: &str,
    details: Option<String>,
) -> warp::reply::WithStatus<warp::reply::Json> {
    let body = ErrorBody {
        error: error.to_string(),
        details,
    };
    warp::reply::with_status(warp::reply::json(&body), status)
}
