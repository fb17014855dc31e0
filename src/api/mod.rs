//! # API Module
//!
//! HTTP transport for the AIBlock MCP server.
//!
//! ## Available Endpoints
//! - `GET /health` - Liveness check
//! - `POST /` and `POST /mcp` - One JSON-RPC request in, one response out
//!   (notifications are acknowledged with `202 Accepted`)
//!
//! CORS is driven by `MCP_ALLOW_ORIGINS`; preflight requests are answered by the layer.

pub mod health;

use axum::{
    extract::State,
    http::{header::HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response as HttpResponse},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    config::Config,
    mcp::{
        handler::handle_mcp_request,
        protocol::Request,
    },
    AppState,
};

/// Builds the router with tracing and CORS applied.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    Router::new()
        .route("/", post(rpc_handler))
        .route("/mcp", post(rpc_handler))
        .route("/health", get(health::health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let list: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Ignoring invalid origin in MCP_ALLOW_ORIGINS: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static("mcp-session-id"),
            HeaderName::from_static("x-request-id"),
        ])
}

// Forward JSON-RPC requests over HTTP to the MCP handler; notifications get 202 and no body
async fn rpc_handler(State(state): State<AppState>, Json(req): Json<Request>) -> HttpResponse {
    match handle_mcp_request(req, state).await {
        Some(resp) => Json(resp).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
