//! Shared test fixtures: a stub of the hosted model API.

#![allow(dead_code)]

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use warp::Filter;

/// Chat-completions reply whose assistant message carries `content`.
pub fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

/// Serialized analysis content for a stubbed model reply.
pub fn analysis_content(thoughts: &[&str], solution: &str, language: &str) -> String {
    serde_json::json!({
        "thoughts": thoughts,
        "solution": solution,
        "language": language,
    })
    .to_string()
}

/// Bind a stub model API on an ephemeral local port.
///
/// `handler` sees the raw chat-completions request body and returns the
/// JSON the "model" answers with. Async so delays can be simulated.
pub async fn spawn_model_stub<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(serde_json::Value) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = serde_json::Value> + Send,
{
    let route = warp::path!("chat" / "completions")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |body: serde_json::Value| {
            let handler = handler.clone();
            async move {
                let reply = handler(body).await;
                Ok::<_, Infallible>(warp::reply::json(&reply))
            }
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

/// Stub that always answers with the same content, immediately.
pub async fn spawn_fixed_model_stub(content: String) -> SocketAddr {
    spawn_model_stub(move |_body| {
        let content = content.clone();
        async move { chat_reply(&content) }
    })
    .await
}
