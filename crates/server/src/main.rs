//! Battle server binary.
//!
//! Runs the HTTP server for live principle-card battles.
//! Supports WebSocket connections for real-time sync.

#[tokio::main]
async fn main() {
    lgm_core::log();
    lgm_server::run().await.expect("server failed");
}
