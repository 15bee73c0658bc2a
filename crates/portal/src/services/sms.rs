//! Twilio SMS gateway.
//!
//! Implements the core `SmsGateway` trait over Twilio's REST API. When no
//! credentials are configured the gateway is disabled and every delivery
//! attempt reports as such; the notification dispatcher turns that into a
//! skip.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use curbside_core::scheduling::{DeliveryError, SmsGateway};

use crate::config::TwilioConfig;

/// Twilio REST API base URL.
const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Successful message creation response (fields we care about).
#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// SMS gateway backed by Twilio, or disabled when unconfigured.
pub struct TwilioSms {
    inner: Option<TwilioInner>,
}

struct TwilioInner {
    /// HTTP client.
    client: Client,
    /// Twilio account SID (also the basic-auth username).
    account_sid: String,
    /// Auth token for basic auth.
    auth_token: SecretString,
    /// Sending phone number.
    from_number: String,
}

impl std::fmt::Debug for TwilioSms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Some(inner) => f
                .debug_struct("TwilioSms")
                .field("account_sid", &inner.account_sid)
                .field("auth_token", &"[REDACTED]")
                .field("from_number", &inner.from_number)
                .finish(),
            None => f.debug_struct("TwilioSms").field("enabled", &false).finish(),
        }
    }
}

impl TwilioSms {
    /// Create a gateway from optional Twilio configuration.
    #[must_use]
    pub fn new(config: Option<&TwilioConfig>) -> Self {
        let inner = config.map(|config| TwilioInner {
            client: Client::new(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
        });

        Self { inner }
    }

    /// Whether Twilio credentials are configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }
}

impl SmsGateway for TwilioSms {
    #[instrument(skip(self, body))]
    async fn deliver(&self, to: &str, body: &str) -> Result<(), DeliveryError> {
        let Some(inner) = &self.inner else {
            return Err(DeliveryError::Disabled);
        };

        let to = normalize_us_number(to);

        let response = inner
            .client
            .post(format!(
                "{TWILIO_API_BASE}/Accounts/{}/Messages.json",
                inner.account_sid
            ))
            .basic_auth(&inner.account_sid, Some(inner.auth_token.expose_secret()))
            .form(&[
                ("To", to.as_str()),
                ("From", inner.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| DeliveryError::Failed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Failed(format!(
                "Twilio returned {status}: {detail}"
            )));
        }

        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| DeliveryError::Failed(e.to_string()))?;

        debug!(sid = %message.sid, to = %to, "SMS handed to Twilio");

        Ok(())
    }
}

/// Normalize a US phone number to E.164.
///
/// Bare 10-digit numbers get a `+1` prefix; an 11-digit number starting
/// with 1 gets `+`; anything else is passed through with a `+`.
fn normalize_us_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == 10 {
        format!("+1{digits}")
    } else if digits.len() == 11 && digits.starts_with('1') {
        format!("+{digits}")
    } else {
        format!("+{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_ten_digits() {
        assert_eq!(normalize_us_number("5558675309"), "+15558675309");
    }

    #[test]
    fn test_normalize_formatted_number() {
        assert_eq!(normalize_us_number("(555) 867-5309"), "+15558675309");
        assert_eq!(normalize_us_number("555-867-5309"), "+15558675309");
    }

    #[test]
    fn test_normalize_eleven_digits_with_country_code() {
        assert_eq!(normalize_us_number("1 555 867 5309"), "+15558675309");
        assert_eq!(normalize_us_number("+1 555 867 5309"), "+15558675309");
    }

    #[test]
    fn test_disabled_gateway() {
        let gateway = TwilioSms::new(None);
        assert!(!gateway.is_enabled());
    }
}
