//! HTTP relay: lets a storefront hand its lifecycle events over as JSON.

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::host::{HostEvent, RequestEvent, ResourceControllerEvent};
use crate::translators::Outcome;
use crate::wiring::TrackingSubscribers;
use crate::TrackingError;

#[derive(Clone)]
pub struct AppState { pub subscribers: Arc<TrackingSubscribers> }

type Reply = Result<(StatusCode, Json<Value>), (StatusCode, String)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy", "service": "opensase-conversions"})) }))
        .route("/api/v1/events/request", post(request_event))
        .route("/api/v1/events/product-show", post(product_show))
        .route("/api/v1/events/product-index", post(product_index))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn request_event(State(s): State<AppState>, Json(e): Json<RequestEvent>) -> Reply {
    reply(s.subscribers.handle(&HostEvent::Request(e)).await)
}

async fn product_show(State(s): State<AppState>, Json(e): Json<ResourceControllerEvent>) -> Reply {
    reply(s.subscribers.handle(&HostEvent::ProductShow(e)).await)
}

async fn product_index(State(s): State<AppState>, Json(e): Json<ResourceControllerEvent>) -> Reply {
    reply(s.subscribers.handle(&HostEvent::ProductIndex(e)).await)
}

fn reply(result: crate::Result<Outcome>) -> Reply {
    match result {
        Ok(Outcome::Published(raised)) => Ok((StatusCode::ACCEPTED, Json(json!({
            "status": "published",
            "event_name": raised.event_name(),
            "event_id": raised.event_id,
        })))),
        Ok(Outcome::Skipped(reason)) => Ok((StatusCode::ACCEPTED, Json(json!({"status": "skipped", "reason": reason})))),
        Err(e @ TrackingError::UnexpectedSubject { .. }) => Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string())),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}
