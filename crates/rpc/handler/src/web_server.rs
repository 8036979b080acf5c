use std::net::SocketAddr;

use eyre::Result;
use swap_rpc_state::AppState;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::info;

use crate::router::router;

/// Serves the quote proxy on `host` until `shutdown_token` is cancelled.
pub async fn start_web_server_worker(host: String, app_state: AppState, shutdown_token: CancellationToken) -> Result<String> {
    let router = router(app_state);

    // logging
    let router = router.layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(true)));

    info!("Webserver listening on {}", &host);
    let listener = TcpListener::bind(host).await?;
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            shutdown_token.cancelled().await;
            info!("Shutting down webserver...");
        })
        .await?;

    Ok("Webserver shutdown".to_string())
}
