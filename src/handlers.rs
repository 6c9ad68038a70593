use crate::acs_types::CallbackBody;
use crate::consts::{CALLBACK_ROUTE, HEALTH_ROUTE};
use crate::events;

use axum::{
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, error, info};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct RouteListing {
    pub message: &'static str,
    pub endpoints: RouteEndpoints,
}

#[derive(Serialize)]
pub struct RouteEndpoints {
    pub callback: &'static str,
    pub health: &'static str,
}

/// The receiver's whole HTTP surface.  Shared by the binary and the
/// integration tests.
pub fn router() -> Router {
    Router::new()
        .route(CALLBACK_ROUTE, post(receive_callbacks))
        .route(HEALTH_ROUTE, get(health))
        .route("/", get(root))
        .layer(middleware::from_fn(log_request))
}

async fn log_request<B>(request: Request<B>, next: Next<B>) -> Response {
    info!("incoming {} {}", request.method(), request.uri().path());
    debug!(headers = ?request.headers(), "request headers");
    next.run(request).await
}

/// Accept one event object or a batch, log each, and acknowledge.  Only
/// an unparseable body fails the request; unknown kinds and missing
/// optional fields never do.
pub async fn receive_callbacks(body: String) -> impl IntoResponse {
    info!("call event received");
    let events = match serde_json::from_str::<CallbackBody>(&body) {
        Ok(parsed) => parsed.into_events(),
        Err(e) => {
            error!(error = %e, "failed to deserialize callback body");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error processing event");
        }
    };
    for event in &events {
        events::log_event(event);
    }
    (StatusCode::OK, "Event received")
}

pub async fn health() -> Json<HealthResponse> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(HealthResponse {
        status: "OK",
        timestamp,
    })
}

pub async fn root() -> Json<RouteListing> {
    Json(RouteListing {
        message: "Azure Communication Services webhook server",
        endpoints: RouteEndpoints {
            callback: CALLBACK_ROUTE,
            health: HEALTH_ROUTE,
        },
    })
}
