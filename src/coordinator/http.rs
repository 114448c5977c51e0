//! HTTP API for the resize coordinator
//!
//! Two authenticated endpoints: `/sec/volume/grow` runs the full cluster-wide
//! orchestration, `/sec/lv/grow` grows only the receiving node and is the
//! endpoint peers call during fan-out. Error responses carry the kind-level
//! message only; the detailed cause is logged here and nowhere else.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::common::auth::SharedSecretAuth;
use crate::coordinator::commands::CommandRunner;
use crate::coordinator::grow::GrowCoordinator;
use crate::coordinator::peers::PeerDirectory;
use crate::coordinator::remote::{ResizeEnvelope, ResizeTransport};

/// Shared coordinator state for HTTP handlers.
pub struct AppState<D, T, R> {
    pub coordinator: Arc<GrowCoordinator<D, T, R>>,
    pub auth: Arc<SharedSecretAuth>,
}

impl<D, T, R> Clone for AppState<D, T, R> {
    fn clone(&self) -> Self {
        Self {
            coordinator: self.coordinator.clone(),
            auth: self.auth.clone(),
        }
    }
}

/// Creates the HTTP router. The `/sec/*` routes require the cluster's Basic
/// credential; the health endpoints are open.
pub fn create_router<D, T, R>(state: AppState<D, T, R>) -> Router
where
    D: PeerDirectory + Send + Sync + 'static,
    T: ResizeTransport + Send + Sync + 'static,
    R: CommandRunner + Send + Sync + 'static,
{
    let secured = Router::new()
        .route("/sec/volume/grow", post(grow_volume::<D, T, R>))
        .route("/sec/lv/grow", post(grow_lv::<D, T, R>))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            basic_auth_middleware,
        ));

    Router::new()
        .merge(secured)
        .route("/health", get(health))
        .route("/health/live", get(health_live))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Validates the `Authorization: Basic` header against the shared cluster
/// credential before any secured handler runs.
async fn basic_auth_middleware(
    State(auth): State<Arc<SharedSecretAuth>>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match header {
        Some(value) if auth.verify_basic_header(value) => next.run(request).await,
        Some(_) => {
            tracing::warn!("request with invalid cluster credentials");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "invalid credentials" })),
            )
                .into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "authentication required" })),
        )
            .into_response(),
    }
}

/// Grow a volume across the whole cluster: all peers first, then this node.
async fn grow_volume<D, T, R>(
    State(state): State<AppState<D, T, R>>,
    Json(envelope): Json<ResizeEnvelope>,
) -> impl IntoResponse
where
    D: PeerDirectory + Send + Sync + 'static,
    T: ResizeTransport + Send + Sync + 'static,
    R: CommandRunner + Send + Sync + 'static,
{
    tracing::info!(
        pv_name = %envelope.pv_name,
        new_size = %envelope.new_size,
        "got request to grow volume"
    );

    match state
        .coordinator
        .grow(&envelope.pv_name, &envelope.new_size)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "volume was resized" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "growing volume failed");
            (
                e.to_http_status(),
                Json(json!({ "message": e.public_message() })),
            )
        }
    }
}

/// Grow only this node's logical volume, without fan-out. Called by peers.
async fn grow_lv<D, T, R>(
    State(state): State<AppState<D, T, R>>,
    Json(envelope): Json<ResizeEnvelope>,
) -> impl IntoResponse
where
    D: PeerDirectory + Send + Sync + 'static,
    T: ResizeTransport + Send + Sync + 'static,
    R: CommandRunner + Send + Sync + 'static,
{
    tracing::info!(
        pv_name = %envelope.pv_name,
        new_size = %envelope.new_size,
        "got request to grow logical volume"
    );

    match state
        .coordinator
        .grow_local(&envelope.pv_name, &envelope.new_size)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "lv was grown" }))),
        Err(e) => {
            tracing::error!(error = %e, "growing logical volume failed");
            (
                e.to_http_status(),
                Json(json!({ "message": e.public_message() })),
            )
        }
    }
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness probe: if we can respond, we're alive.
async fn health_live() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "alive": true })))
}
