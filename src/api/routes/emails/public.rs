//! Public types for the emails API
use serde::Deserialize;

pub use crate::mail::InboundEmail;

/// Query parameters for listing recent emails
#[derive(Deserialize)]
pub struct EmailsQuery {
    pub limit: Option<u32>,
    pub days: Option<u32>,
}
