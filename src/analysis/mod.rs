//! Capture analysis domain — validation, submission, current-result slot.
//!
//! The flow is one unary request per capture: validate the payload
//! locally, require a credential, make exactly one call to the Analysis
//! Service, and on success replace the current result. A failed analysis
//! leaves the previous result untouched.

mod client;
mod encoding;
mod store;
mod types;

pub use client::{AnalysisClient, AnalysisError};
pub use encoding::{normalize_base64, strip_data_url_prefix, EncodingError};
pub use store::ResultStore;
pub use types::{Analysis, AnalyzeRequest, ErrorBody};

/// Run one capture-to-result cycle: analyze the payload and, on success,
/// make the outcome the current result.
///
/// Concurrent submissions are allowed (a new capture supersedes a pending
/// one); each success replaces the slot on arrival, so the last request
/// to *resolve* wins, regardless of submission order.
pub async fn submit(
    client: &AnalysisClient,
    store: &ResultStore,
    api_key: &str,
    base64_input: &str,
) -> Result<Analysis, AnalysisError> {
    let analysis = client.analyze(base64_input, api_key).await?;
    store.replace(analysis.clone());
    Ok(analysis)
}
