//! API routes module

pub mod emails;
pub mod send;
mod service;

use std::sync::{Arc, RwLock};

use axum::Router;

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Service description and allow-list exposure
        .merge(service::router())
        // Inbox retrieval
        .merge(emails::router())
        // Outbound send
        .merge(send::router())
}
