//! Crew password hashing for admin-side create/update.
//!
//! Crews log in at the portal; the admin console only ever writes hashes.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Password hashing failure.
#[derive(Debug, Error)]
#[error("password hashing failed")]
pub struct PasswordHashError;

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `PasswordHashError` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordHashError)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_is_verifiable_argon2id() {
        let hash = hash_password("crew123").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"crew123", &parsed)
                .is_ok()
        );
    }
}
