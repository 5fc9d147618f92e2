//! Router for outbound email

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json};

use super::public;
use crate::api::state::AppState;
use crate::mail::{self, OutboundEmail, SendResult};

type SharedState = Arc<RwLock<AppState>>;

/// Send an email through the gateway. Rejected recipients and transport
/// failures both come back as a 400 with the failure reason.
async fn send_email_handler(
    State(state): State<SharedState>,
    Json(request): Json<public::SendEmailRequest>,
) -> Result<Json<SendResult>, crate::api::public::ApiError> {
    let (config, mailer) = {
        let state = state.read().unwrap();
        (state.config.clone(), Arc::clone(&state.mailer))
    };

    let outbound = OutboundEmail {
        to: request.to,
        subject: request.subject,
        body: request.body,
        attachments: request.attachments.into_iter().map(PathBuf::from).collect(),
    };

    let result = mail::send_email(&config, mailer.as_ref(), &outbound).await;
    if result.success {
        Ok(Json(result))
    } else {
        Err(crate::api::public::ApiError::bad_request(result.message))
    }
}

/// Create the send router
pub fn router() -> Router<SharedState> {
    Router::new().route("/send-email/", axum::routing::post(send_email_handler))
}
