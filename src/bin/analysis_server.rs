//! Standalone Analysis Service.
//!
//! The app embeds the same service; this binary exists for running it on
//! another machine or behind a credential-holding deployment.
//! Configuration: `PORT` (default 3000) and `OPENAI_API_KEY` via the
//! environment or a `.env` file.

use snap_solve_lib::server;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let port = server::port_from_env();
    server::run(port, server::ModelProvider::from_env()).await;
}
