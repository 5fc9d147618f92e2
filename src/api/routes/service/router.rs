//! Router for the service description and read-only configuration

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json};
use serde_json::json;

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn root_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let allowed = state
        .read()
        .unwrap()
        .config
        .allowed_senders
        .addresses()
        .to_vec();

    Json(json!({
        "message": "Welcome to Email Service API",
        "description": "API for receiving emails from allowed senders and sending emails",
        "allowed_senders": allowed,
    }))
}

async fn allowed_senders_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let allowed = state
        .read()
        .unwrap()
        .config
        .allowed_senders
        .addresses()
        .to_vec();

    Json(json!({ "allowed_senders": allowed }))
}

/// Create the service router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::get(root_handler))
        .route("/allowed-senders/", axum::routing::get(allowed_senders_handler))
}
