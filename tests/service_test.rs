//! Analysis Service contract tests, driven through `warp::test` against
//! a stubbed hosted model API.

mod common;

use common::{analysis_content, spawn_fixed_model_stub};
use snap_solve_lib::server::routes::analyze_route;
use snap_solve_lib::server::ModelProvider;
use std::sync::Arc;

fn provider_for(addr: std::net::SocketAddr) -> Arc<ModelProvider> {
    Arc::new(ModelProvider::new(
        format!("http://{}", addr),
        Some("server-key".into()),
    ))
}

/// Provider pointing at a closed port — requests that should never reach
/// the model fail loudly if they do.
fn unreachable_provider() -> Arc<ModelProvider> {
    Arc::new(ModelProvider::new(
        "http://127.0.0.1:9",
        Some("server-key".into()),
    ))
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_base64_input_is_a_400() {
    let route = analyze_route(unreachable_provider());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/analyze-image")
        .json(&serde_json::json!({}))
        .reply(&route)
        .await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["error"], "No base64 data provided");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_base64_input_is_a_400() {
    let route = analyze_route(unreachable_provider());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/analyze-image")
        .json(&serde_json::json!({ "base64Input": "   " }))
        .reply(&route)
        .await;

    assert_eq!(resp.status(), 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn well_formed_reply_passes_through_verbatim() {
    let content = analysis_content(
        &["hash map lookup", "O(n) time, O(n) space"],
        "def two_sum(nums, target):\n    ...",
        "python",
    );
    let addr = spawn_fixed_model_stub(content).await;
    let route = analyze_route(provider_for(addr));

    let resp = warp::test::request()
        .method("POST")
        .path("/api/analyze-image")
        .json(&serde_json::json!({ "base64Input": "QUJDRA==" }))
        .reply(&route)
        .await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();

    // Exactly the three contract fields, values untouched.
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 3);
    assert_eq!(body["thoughts"][0], "hash map lookup");
    assert_eq!(body["solution"], "def two_sum(nums, target):\n    ...");
    assert_eq!(body["language"], "python");
}

#[tokio::test(flavor = "multi_thread")]
async fn data_url_prefixed_payload_is_accepted() {
    let content = analysis_content(&[], "fn main() {}", "rust");
    let addr = spawn_fixed_model_stub(content).await;
    let route = analyze_route(provider_for(addr));

    let resp = warp::test::request()
        .method("POST")
        .path("/api/analyze-image")
        .json(&serde_json::json!({
            "base64Input": "data:image/png;base64,QUJDRA=="
        }))
        .reply(&route)
        .await;

    assert_eq!(resp.status(), 200);
}

#[tokio::test(flavor = "multi_thread")]
async fn reply_missing_solution_is_a_500_with_details() {
    let content = r#"{"thoughts":["only thoughts"],"language":"python"}"#;
    let addr = spawn_fixed_model_stub(content.to_string()).await;
    let route = analyze_route(provider_for(addr));

    let resp = warp::test::request()
        .method("POST")
        .path("/api/analyze-image")
        .json(&serde_json::json!({ "base64Input": "QUJDRA==" }))
        .reply(&route)
        .await;

    // Never a 200 with a partially-populated object.
    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["error"], "Error analyzing image");
    let details = body["details"].as_str().unwrap();
    assert!(!details.is_empty());
    assert!(details.contains("solution"), "details was: {}", details);
}

#[tokio::test(flavor = "multi_thread")]
async fn reply_with_extra_fields_is_a_500() {
    let content = r#"{"thoughts":[],"solution":"s","language":"go","confidence":0.8}"#;
    let addr = spawn_fixed_model_stub(content.to_string()).await;
    let route = analyze_route(provider_for(addr));

    let resp = warp::test::request()
        .method("POST")
        .path("/api/analyze-image")
        .json(&serde_json::json!({ "base64Input": "QUJDRA==" }))
        .reply(&route)
        .await;

    assert_eq!(resp.status(), 500);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_model_output_is_a_500() {
    let addr = spawn_fixed_model_stub("Here's what I think...".to_string()).await;
    let route = analyze_route(provider_for(addr));

    let resp = warp::test::request()
        .method("POST")
        .path("/api/analyze-image")
        .json(&serde_json::json!({ "base64Input": "QUJDRA==" }))
        .reply(&route)
        .await;

    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert!(body["details"].as_str().unwrap().len() > 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn no_credential_anywhere_is_a_500() {
    let provider = Arc::new(ModelProvider::new("http://127.0.0.1:9", None));
    let route = analyze_route(provider);

    let resp = warp::test::request()
        .method("POST")
        .path("/api/analyze-image")
        .json(&serde_json::json!({ "base64Input": "QUJDRA==" }))
        .reply(&route)
        .await;

    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert!(body["details"].as_str().unwrap().contains("API key"));
}
