//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::PortalConfig;
use crate::services::sms::TwilioSms;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    pool: PgPool,
    sms: TwilioSms,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: PortalConfig, pool: PgPool) -> Self {
        let sms = TwilioSms::new(config.twilio.as_ref());

        Self {
            inner: Arc::new(AppStateInner { config, pool, sms }),
        }
    }

    /// Get a reference to the portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the SMS gateway.
    #[must_use]
    pub fn sms(&self) -> &TwilioSms {
        &self.inner.sms
    }
}
