//! Best-effort SMS notification dispatch.
//!
//! Template resolution (the template must exist to send) is decoupled from
//! delivery failure (which must never abort the caller). [`dispatch`]
//! therefore never returns an error: every failure path logs and reports
//! [`NotifyOutcome::Skipped`].

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::store::ScheduleStore;
use crate::types::TemplateKind;

/// Matches a US phone number embedded in address free text.
static PHONE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

/// Errors a gateway can report on delivery.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The gateway has no provider credentials configured.
    #[error("SMS delivery is disabled")]
    Disabled,

    /// The provider rejected or failed the send.
    #[error("SMS delivery failed: {0}")]
    Failed(String),
}

/// Outbound SMS delivery.
#[allow(async_fn_in_trait)]
pub trait SmsGateway {
    /// Deliver `body` to the phone number `to`.
    async fn deliver(&self, to: &str, body: &str) -> Result<(), DeliveryError>;
}

/// What happened to a notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The message was handed to the provider.
    Sent,
    /// No template, no destination, or delivery failed. Logged, not an
    /// error.
    Skipped,
}

/// Substitute `[name]` placeholders in a template.
///
/// Unmatched placeholders remain literally in the output; unknown variables
/// are ignored.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (name, value) in vars {
        out = out.replace(&format!("[{name}]"), value);
    }
    out
}

/// Find a contact phone number embedded in the pickup address, if any.
#[must_use]
pub fn extract_phone(address: &str) -> Option<String> {
    PHONE_TOKEN
        .find(address)
        .map(|m| m.as_str().trim().to_owned())
}

/// Format and send the notification for a lifecycle event.
///
/// Looks up the template for `kind`, substitutes `vars`, and attempts
/// delivery to `to`. Absent template, absent destination, and delivery
/// failure all log and return [`NotifyOutcome::Skipped`].
pub async fn dispatch<S, G>(
    store: &S,
    gateway: &G,
    kind: TemplateKind,
    to: Option<&str>,
    vars: &[(&str, &str)],
) -> NotifyOutcome
where
    S: ScheduleStore,
    G: SmsGateway,
{
    let template = match store.template(kind).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            tracing::debug!(kind = %kind, "no SMS template configured, skipping notification");
            return NotifyOutcome::Skipped;
        }
        Err(err) => {
            tracing::warn!(kind = %kind, error = %err, "failed to load SMS template");
            return NotifyOutcome::Skipped;
        }
    };

    let Some(to) = to else {
        tracing::debug!(kind = %kind, "no contact phone number, skipping notification");
        return NotifyOutcome::Skipped;
    };

    let body = render_template(&template.template_text, vars);

    match gateway.deliver(to, &body).await {
        Ok(()) => {
            tracing::info!(kind = %kind, "notification sent");
            NotifyOutcome::Sent
        }
        Err(err) => {
            tracing::warn!(kind = %kind, error = %err, "notification delivery failed");
            NotifyOutcome::Skipped
        }
    }
}
