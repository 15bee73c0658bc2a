//! Crew authentication service.
//!
//! Verifies crew email/password pairs against argon2id hashes stored on
//! the crew record.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use sqlx::PgPool;
use thiserror::Error;

use curbside_core::Email;
use curbside_core::scheduling::Crew;

use crate::db::RepositoryError;
use crate::db::crews::CrewRepository;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately does not disclose
    /// which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Authentication service for the crew context.
pub struct CrewAuthService<'a> {
    crews: CrewRepository<'a>,
}

impl<'a> CrewAuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            crews: CrewRepository::new(pool),
        }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is
    /// wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<Crew, AuthError> {
        // A malformed email can't match any crew; same generic rejection.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (crew, password_hash) = self
            .crews
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(crew)
    }
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
