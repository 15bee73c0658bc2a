//! Admin credential verification.
//!
//! The admin is a single configured email/password pair, not a database
//! row. Both comparisons are constant-time so response timing leaks nothing
//! about how much of the pair matched.

use secrecy::ExposeSecret;

use crate::config::AdminConfig;

/// Check a submitted email/password pair against the configured admin
/// credential.
#[must_use]
pub fn verify_admin_credentials(config: &AdminConfig, email: &str, password: &str) -> bool {
    let email_ok = constant_time_compare(&config.admin_email, email);
    let password_ok = constant_time_compare(config.admin_password.expose_secret(), password);
    email_ok && password_ok
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config() -> AdminConfig {
        AdminConfig {
            database_url: SecretString::from("postgres://test".to_string()),
            host: "127.0.0.1".parse().expect("valid address"),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            admin_email: "admin@curbside.example".to_string(),
            admin_password: SecretString::from("hunter2hunter2".to_string()),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(!constant_time_compare("hello", "helloo"));
    }

    #[test]
    fn test_correct_pair_accepted() {
        assert!(verify_admin_credentials(
            &config(),
            "admin@curbside.example",
            "hunter2hunter2"
        ));
    }

    #[test]
    fn test_wrong_email_rejected() {
        assert!(!verify_admin_credentials(
            &config(),
            "crew1@example.com",
            "hunter2hunter2"
        ));
    }

    #[test]
    fn test_wrong_password_rejected() {
        assert!(!verify_admin_credentials(
            &config(),
            "admin@curbside.example",
            "wrong"
        ));
    }
}
