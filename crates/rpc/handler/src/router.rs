use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use swap_rpc_state::AppState;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handler::quote::{quote, quote_preflight};

pub fn router(app_state: AppState) -> Router<()> {
    Router::new()
        .nest("/api", Router::new().route("/quote", get(quote).options(quote_preflight)))
        .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")))
        .with_state(app_state)
}
