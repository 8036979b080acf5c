use axum::extract::{Query, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use swap_rpc_state::AppState;
use tracing::{debug, error};

use crate::dto::error::ErrorResponse;
use crate::dto::quote::QuoteParams;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Forwards a quote request upstream and relays status and body unchanged.
pub async fn quote(State(app_state): State<AppState>, Query(pairs): Query<Vec<(String, String)>>) -> Response {
    let Some(request) = QuoteParams::from_pairs(pairs).into_request() else {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::missing_params())).into_response();
    };

    match app_state.quote.fetch(&request).await {
        Ok(upstream) => {
            debug!("Quote upstream status={} bytes={}", upstream.status, upstream.body.len());
            let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let content_type = upstream.content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            (status, [(CONTENT_TYPE, content_type)], upstream.body).into_response()
        }
        Err(e) => {
            error!("Quote proxy error : {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::proxy_error(e.to_string()))).into_response()
        }
    }
}

/// CORS preflight.
pub async fn quote_preflight() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, [(ACCESS_CONTROL_ALLOW_METHODS, "GET,OPTIONS"), (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization")])
}
