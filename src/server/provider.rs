//! Hosted multimodal model call — prompt, submission, schema validation.
//!
//! The model is asked for output constrained to the three-field analysis
//! schema. Whatever comes back is strict-deserialized; a reply that fails
//! validation is an error with the concrete reason, never a partial result.

use crate::analysis::Analysis;

/// Hosted model used for image analysis.
const MODEL: &str = "gpt-4o";
const MAX_TOKENS: u32 = 1000;
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Fixed instruction prompt sent with every capture.
const ANALYZE_PROMPT: &str = "Analyze the coding problem shown in this image. \
Think through it in the first person: enumerate distinct thoughts about the \
approach, data structures, and time/space complexity. Then write a complete \
solution. The solution code must be in the programming language shown in the \
image and must match any given function or class signature exactly as shown.";

pub struct ModelProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ModelProvider {
    /// Provider against the hosted API, credential from `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Submit prompt + image, await the single reply, validate it.
    ///
    /// A caller-supplied credential takes precedence over the service's
    /// own key (credential pass-through deployments).
    pub async fn analyze_image(
        &self,
        base64_image: &str,
        caller_key: Option<&str>,
    ) -> Result<Analysis, ProviderError> {
        let key = caller_key
            .filter(|k| !k.trim().is_empty())
            .or(self.api_key.as_deref())
            .ok_or(ProviderError::MissingApiKey)?;

        let start = std::time::Instant::now();

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key)
            .json(&request_body(base64_image))
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[MODEL] API returned {}: {}", status, body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        log::info!("[MODEL] API latency: {}ms", start.elapsed().as_millis());

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::SchemaViolation("model reply contained no text content".into())
            })?;

        parse_model_reply(content)
    }
}

/// Chat-completions request with an image part and a strict response schema.
fn request_body(base64_image: &str) -> serde_json::Value {
    serde_json::json!({
        "model": MODEL,
        "max_tokens": MAX_TOKENS,
        "messages": [
            {
                "role": "user",
                "content": [
                    { "type": "text", "text": ANALYZE_PROMPT },
                    {
                        "type": "image_url",
                        "image_url": {
                            "url": format!("data:image/png;base64,{}", base64_image),
                        },
                    },
                ],
            }
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "code_analysis",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "thoughts": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "First-person reasoning statements about approach and complexity",
                        },
                        "solution": {
                            "type": "string",
                            "description": "Complete solution code matching the signature in the image",
                        },
                        "language": {
                            "type": "string",
                            "description": "Programming language of the solution",
                        },
                    },
                    "required": ["thoughts", "solution", "language"],
                    "additionalProperties": false,
                },
            },
        },
    })
}

/// Validate the model's text content against the three-field contract.
pub fn parse_model_reply(content: &str) -> Result<Analysis, ProviderError> {
    let json_str = strip_code_fences(content);
    serde_json::from_str(&json_str)
        .map_err(|e| ProviderError::SchemaViolation(e.to_string()))
}

/// Strip markdown code fences from model output.
///
/// Models wrap JSON in ```json ... ``` despite being told not to.
/// Safe to call on unfenced text.
fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        let after_open = match trimmed.find('\n') {
            Some(pos) => &trimmed[pos + 1..],
            None => trimmed,
        };
        let stripped = after_open.trim_end();
        if stripped.ends_with("```") {
            stripped[..stripped.len() - 3].trim().to_string()
        } else {
            after_open.trim().to_string()
        }
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("No API key provided and OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Model request failed: {0}")]
    Http(String),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model output failed schema validation: {0}")]
    SchemaViolation(String),
}
