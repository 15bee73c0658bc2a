//! Crew account management commands.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use curbside_core::{Email, ZipPrefix};

use super::{CliError, database_url};

/// Create a new crew account.
///
/// # Errors
///
/// Returns an error for invalid input, a duplicate email, or a database
/// failure.
pub async fn create(
    email: &str,
    name: &str,
    password: &str,
    zip_prefixes: &str,
) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    if name.trim().is_empty() {
        return Err(CliError::InvalidInput("display name is required".into()));
    }

    let prefixes = parse_prefixes(zip_prefixes)?;
    let password_hash = hash_password(password)?;

    let database_url = database_url()?;
    let pool = PgPool::connect(&database_url).await?;

    let crew_id = sqlx::query_scalar::<_, i32>(
        r"
        INSERT INTO crew (email, password_hash, display_name, zip_prefixes)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        ",
    )
    .bind(email.as_str())
    .bind(&password_hash)
    .bind(name.trim())
    .bind(&prefixes)
    .fetch_one(&pool)
    .await?;

    tracing::info!(id = crew_id, email = %email, "Crew created");
    Ok(())
}

/// Parse a comma-separated prefix list, ignoring empty segments.
fn parse_prefixes(raw: &str) -> Result<Vec<String>, CliError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            ZipPrefix::parse(s)
                .map(|p| p.as_str().to_owned())
                .map_err(|e| CliError::InvalidInput(format!("{s:?}: {e}")))
        })
        .collect()
}

/// Hash a password using Argon2id.
pub(crate) fn hash_password(password: &str) -> Result<String, CliError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CliError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixes() {
        assert_eq!(
            parse_prefixes("100, 101,102").unwrap(),
            vec!["100", "101", "102"]
        );
        assert!(parse_prefixes("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_prefixes_rejects_invalid() {
        assert!(parse_prefixes("100,abc").is_err());
        assert!(parse_prefixes("1000").is_err());
    }
}
