use std::sync::Arc;

use crate::core::AppConfig;
use crate::mail::MailTransport;

/// Read-only state shared by all handlers: the startup configuration
/// and the outbound transport. Never mutated after startup, so
/// concurrent invocations need no coordination.
pub struct AppState {
    pub config: AppConfig,
    pub mailer: Arc<dyn MailTransport>,
}

impl AppState {
    pub fn new(config: AppConfig, mailer: Arc<dyn MailTransport>) -> Self {
        Self { config, mailer }
    }
}
