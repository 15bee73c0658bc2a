//! ZIP-prefix routing type.
//!
//! Crews are routed by the first 3 digits of a 5-digit US postal code
//! embedded in the pickup address free text.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the first 5-digit ZIP token in an address, with an optional
/// 4-digit extension (`62704` or `62704-1234`).
static ZIP_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"\b(\d{5})(?:-\d{4})?\b").unwrap()
});

/// Errors that can occur when parsing a [`ZipPrefix`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ZipPrefixError {
    /// The input is not exactly 3 characters.
    #[error("ZIP prefix must be exactly 3 digits")]
    WrongLength,
    /// The input contains a non-digit character.
    #[error("ZIP prefix must contain only digits")]
    NonDigit,
}

/// The routing key for crew assignment: the first 3 digits of a ZIP code.
///
/// ## Examples
///
/// ```
/// use curbside_core::ZipPrefix;
///
/// assert!(ZipPrefix::parse("627").is_ok());
///
/// assert!(ZipPrefix::parse("62").is_err());   // too short
/// assert!(ZipPrefix::parse("6270").is_err()); // too long
/// assert!(ZipPrefix::parse("62a").is_err());  // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ZipPrefix(String);

impl ZipPrefix {
    /// Parse a `ZipPrefix` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly 3 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, ZipPrefixError> {
        if s.len() != 3 {
            return Err(ZipPrefixError::WrongLength);
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ZipPrefixError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the prefix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ZipPrefix {
    type Err = ZipPrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Scan an address for the first 5-digit ZIP token and return its routing
/// prefix.
///
/// The first matching token wins; no further candidates are considered. An
/// address with no ZIP token yields `None`.
#[must_use]
pub fn extract_zip_prefix(address: &str) -> Option<ZipPrefix> {
    let token = ZIP_TOKEN.captures(address)?.get(1)?.as_str();
    let prefix = token.get(..3)?;
    ZipPrefix::parse(prefix).ok()
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ZipPrefix {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ZipPrefix {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ZipPrefix {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_prefix() {
        assert_eq!(ZipPrefix::parse("627").unwrap().as_str(), "627");
        assert_eq!(ZipPrefix::parse("001").unwrap().as_str(), "001");
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            ZipPrefix::parse("62"),
            Err(ZipPrefixError::WrongLength)
        ));
        assert!(matches!(
            ZipPrefix::parse("6270"),
            Err(ZipPrefixError::WrongLength)
        ));
        assert!(matches!(
            ZipPrefix::parse(""),
            Err(ZipPrefixError::WrongLength)
        ));
    }

    #[test]
    fn test_parse_non_digit() {
        assert!(matches!(
            ZipPrefix::parse("62a"),
            Err(ZipPrefixError::NonDigit)
        ));
    }

    #[test]
    fn test_extract_from_typical_address() {
        let prefix = extract_zip_prefix("12 Main St, Springfield, 62704").unwrap();
        assert_eq!(prefix.as_str(), "627");
    }

    #[test]
    fn test_extract_with_plus_four_extension() {
        let prefix = extract_zip_prefix("12 Main St, Springfield, 62704-1234").unwrap();
        assert_eq!(prefix.as_str(), "627");
    }

    #[test]
    fn test_extract_first_token_wins() {
        let prefix = extract_zip_prefix("PO Box 10001, Springfield, 62704").unwrap();
        assert_eq!(prefix.as_str(), "100");
    }

    #[test]
    fn test_extract_no_zip() {
        assert!(extract_zip_prefix("12 Main St, Springfield").is_none());
        assert!(extract_zip_prefix("").is_none());
    }

    #[test]
    fn test_extract_ignores_short_and_long_runs() {
        // 4-digit house number and a run of more than 5 digits are not ZIPs.
        assert!(extract_zip_prefix("1234 Elm St").is_none());
        assert!(extract_zip_prefix("order 1234567").is_none());
    }
}
