mod analyzer;
mod routes;
mod state;

pub use analyzer::{Analyzer, BrowserAnalyzer};
pub use routes::{ANALYSIS_FAILED_MSG, build_router};
pub use state::AppState;

use std::net::SocketAddr;

/// Serve the analyzer UI and API on `addr` until the process stops.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, router).await
}
