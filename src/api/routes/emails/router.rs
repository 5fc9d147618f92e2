//! Router for inbox retrieval

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::Query;

use super::public;
use crate::api::state::AppState;
use crate::mail::{self, InboundEmail};

type SharedState = Arc<RwLock<AppState>>;

/// List recent messages from allow-listed senders, newest first.
/// Out-of-bounds parameters are rejected before the pipeline runs.
/// Mailbox problems degrade to an empty list so a transient provider
/// issue never hard-fails the endpoint.
async fn list_emails_handler(
    State(state): State<SharedState>,
    Query(params): Query<public::EmailsQuery>,
) -> Result<Json<Vec<InboundEmail>>, crate::api::public::ApiError> {
    let limit = params.limit.unwrap_or(mail::DEFAULT_LIMIT);
    let days = params.days.unwrap_or(mail::DEFAULT_DAYS);

    if !(1..=mail::MAX_LIMIT).contains(&limit) {
        return Err(crate::api::public::ApiError::bad_request(format!(
            "limit must be between 1 and {}",
            mail::MAX_LIMIT
        )));
    }
    if !(1..=mail::MAX_DAYS).contains(&days) {
        return Err(crate::api::public::ApiError::bad_request(format!(
            "days must be between 1 and {}",
            mail::MAX_DAYS
        )));
    }

    let config = state.read().unwrap().config.clone();
    match mail::fetch_recent(&config, limit, days).await {
        Ok(emails) => Ok(Json(emails)),
        Err(error) => {
            tracing::warn!(%error, "retrieval failed, returning an empty result");
            Ok(Json(Vec::new()))
        }
    }
}

/// Create the emails router
pub fn router() -> Router<SharedState> {
    Router::new().route("/emails/", axum::routing::get(list_emails_handler))
}
