//! Wire and display shapes shared by the client and the service.

use serde::{Deserialize, Serialize};

/// One completed analysis: ordered first-person reasoning statements, a
/// single solution blob, and the solution's language tag.
///
/// `deny_unknown_fields` makes deserialization double as schema
/// validation — a reply with extra or missing fields is rejected, never
/// partially accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Analysis {
    pub thoughts: Vec<String>,
    pub solution: String,
    pub language: String,
}

/// Request body for `POST /api/analyze-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub base64_input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Error body the service returns on 400/500.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
