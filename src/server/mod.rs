//! Analysis Service — the companion HTTP endpoint.
//!
//! A stateless pass-through: one inbound request yields exactly one
//! outbound model call. No caching, no retries, no batching. Runs
//! embedded in the app (spawned on the Tauri async runtime) or
//! standalone via the `analysis-server` binary.

pub mod provider;
pub mod routes;

pub use provider::{ModelProvider, ProviderError};

use std::sync::Arc;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Serve the analyze endpoint on localhost until the task is dropped.
pub async fn run(port: u16, provider: ModelProvider) {
    let api = routes::routes(Arc::new(provider));
    log::info!("[SERVER] Listening on 127.0.0.1:{}", port);
    warp::serve(api).run(([127, 0, 0, 1], port)).await;
}

/// Port from the `PORT` environment variable, or the default.
pub fn port_from_env() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
