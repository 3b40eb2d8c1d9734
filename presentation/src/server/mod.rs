//! HTTP surface
//!
//! - `POST /ask` - JSON API guarded by the `code-x-key` header
//! - `GET /` - web form with an embedded CSRF token
//! - `POST /web-ask` - web form submission
//! - `GET /health` - liveness

pub mod auth;
pub mod csrf;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub use csrf::{CsrfError, CsrfTokens};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

/// Serve `router` until `shutdown` is cancelled, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(url = %format!("http://{}", addr), "Server ready");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Server stopped");
    Ok(())
}
